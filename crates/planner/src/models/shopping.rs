//! Shopping list items.

use serde::{Deserialize, Serialize};

use revelion_core::{AccountId, ItemId};

use super::Account;

/// Something to buy or bring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: ItemId,
    pub name: String,
    pub checked: bool,
    /// Name of whoever is bringing it. `None` means unclaimed.
    #[serde(
        default,
        deserialize_with = "super::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub claimed_by: Option<String>,
    /// Account that added the item.
    pub added_by: AccountId,
}

impl ShoppingItem {
    /// The creator and privileged accounts may remove an item.
    #[must_use]
    pub fn removable_by(&self, account: &Account) -> bool {
        account.is_privileged() || self.added_by == account.id
    }
}
