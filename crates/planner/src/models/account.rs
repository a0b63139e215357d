//! Account domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use revelion_core::AccountId;

/// Minimum PIN length accepted at registration.
pub const MIN_PIN_LENGTH: usize = 4;

/// Login name of the built-in privileged account (matched case-insensitively).
pub const PRIVILEGED_LOGIN: &str = "admin";

/// PIN of the built-in privileged account.
pub const PRIVILEGED_PIN: &str = "1234";

const PRIVILEGED_ID: &str = "admin";
const PRIVILEGED_DISPLAY_NAME: &str = "Administrator";

/// A registered guest account.
///
/// PINs are stored and compared in plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    /// Display name, unique among accounts ignoring case.
    pub name: String,
    pub pin: String,
    pub is_admin: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// The built-in privileged account. It is never stored.
    #[must_use]
    pub fn privileged() -> Self {
        Self {
            id: AccountId::new(PRIVILEGED_ID),
            name: PRIVILEGED_DISPLAY_NAME.to_owned(),
            pin: PRIVILEGED_PIN.to_owned(),
            is_admin: true,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.is_admin
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
