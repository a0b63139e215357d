//! Shopping list store.
//!
//! Operations on an unknown id are no-ops and report `false`.

use std::sync::Arc;

use tracing::info;

use revelion_core::{AccountId, ItemId};

use super::Collection;
use crate::db::{Storage, StorageError, keys};
use crate::models::ShoppingItem;

/// The shared shopping list.
pub struct ShoppingStore {
    items: Collection<ShoppingItem>,
}

impl ShoppingStore {
    /// Load the stored list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored list cannot be read.
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StorageError> {
        Ok(Self {
            items: Collection::open(storage, keys::SHOPPING)?,
        })
    }

    #[must_use]
    pub fn list(&self) -> &[ShoppingItem] {
        self.items.items()
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&ShoppingItem> {
        self.list().iter().find(|item| &item.id == id)
    }

    /// Append a new unchecked, unclaimed item.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be persisted.
    pub fn add(&mut self, name: &str, creator: &AccountId) -> Result<ShoppingItem, StorageError> {
        let item = ShoppingItem {
            id: ItemId::generate(),
            name: name.to_owned(),
            checked: false,
            claimed_by: None,
            added_by: creator.clone(),
        };

        let mut next = self.items.draft();
        next.push(item.clone());
        self.items.commit(next)?;
        info!(item_id = %item.id, "Shopping item added");
        Ok(item)
    }

    /// Set who brings the item. An empty `claimant` releases the claim.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be persisted.
    pub fn claim(&mut self, id: &ItemId, claimant: &str) -> Result<bool, StorageError> {
        let claimed_by = Some(claimant.to_owned()).filter(|name| !name.is_empty());
        self.update(id, |item| item.claimed_by = claimed_by)
    }

    /// Flip the bought/checked flag.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be persisted.
    pub fn toggle_checked(&mut self, id: &ItemId) -> Result<bool, StorageError> {
        self.update(id, |item| item.checked = !item.checked)
    }

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be persisted.
    pub fn remove(&mut self, id: &ItemId) -> Result<bool, StorageError> {
        let mut next = self.items.draft();
        next.retain(|item| &item.id != id);
        if next.len() == self.list().len() {
            return Ok(false);
        }
        self.items.commit(next)?;
        info!(item_id = %id, "Shopping item removed");
        Ok(true)
    }

    fn update(
        &mut self,
        id: &ItemId,
        change: impl FnOnce(&mut ShoppingItem),
    ) -> Result<bool, StorageError> {
        let mut next = self.items.draft();
        let Some(item) = next.iter_mut().find(|item| &item.id == id) else {
            return Ok(false);
        };
        change(item);
        self.items.commit(next)?;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;

    fn store() -> ShoppingStore {
        ShoppingStore::open(Arc::new(MemoryStorage::new())).unwrap()
    }

    #[test]
    fn test_add_item() {
        let mut store = store();
        let item = store.add("Champagne", &AccountId::new("u1")).unwrap();
        assert!(!item.checked);
        assert!(item.claimed_by.is_none());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_claim_then_release() {
        let mut store = store();
        let item = store.add("Cake", &AccountId::new("u1")).unwrap();

        assert!(store.claim(&item.id, "Ana").unwrap());
        assert_eq!(store.get(&item.id).unwrap().claimed_by.as_deref(), Some("Ana"));

        assert!(store.claim(&item.id, "").unwrap());
        assert!(store.get(&item.id).unwrap().claimed_by.is_none());
    }

    #[test]
    fn test_toggle_checked() {
        let mut store = store();
        let item = store.add("Cake", &AccountId::new("u1")).unwrap();

        store.toggle_checked(&item.id).unwrap();
        assert!(store.get(&item.id).unwrap().checked);
        store.toggle_checked(&item.id).unwrap();
        assert!(!store.get(&item.id).unwrap().checked);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut store = store();
        store.add("Cake", &AccountId::new("u1")).unwrap();
        let missing = ItemId::new("missing");

        assert!(!store.claim(&missing, "Ana").unwrap());
        assert!(!store.toggle_checked(&missing).unwrap());
        assert!(!store.remove(&missing).unwrap());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut store = store();
        let creator = AccountId::new("u1");
        let a = store.add("A", &creator).unwrap();
        let b = store.add("B", &creator).unwrap();
        let c = store.add("C", &creator).unwrap();

        assert!(store.remove(&b.id).unwrap());
        let ids: Vec<_> = store.list().iter().map(|item| item.id.clone()).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }
}
