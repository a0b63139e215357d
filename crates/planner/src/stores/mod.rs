//! Domain stores.
//!
//! Each store exclusively owns one collection and mirrors it to storage under
//! its own key. A mutation builds the next collection, writes it through, and
//! only replaces the in-memory copy once the write succeeded, so a failed
//! write leaves the store unchanged.
//!
//! Cross-store references are by value (names, ids as strings), never shared
//! objects.

pub mod accounts;
pub mod config;
pub mod music;
pub mod participants;
pub mod shopping;

pub use accounts::{AccountError, AccountStore};
pub use config::ConfigStore;
pub use music::{MusicError, MusicStore};
pub use participants::ParticipantStore;
pub use shopping::ShoppingStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::db::{self, Storage, StorageError};

/// An in-memory collection with a durable mirror.
pub(crate) struct Collection<T> {
    storage: Arc<dyn Storage>,
    key: &'static str,
    items: Vec<T>,
}

impl<T: Serialize + DeserializeOwned + Clone> Collection<T> {
    /// Load the collection under `key`; a missing key is an empty collection.
    pub(crate) fn open(storage: Arc<dyn Storage>, key: &'static str) -> Result<Self, StorageError> {
        let items: Vec<T> = db::load(storage.as_ref(), key)?.unwrap_or_default();
        debug!(key, count = items.len(), "Loaded collection");
        Ok(Self {
            storage,
            key,
            items,
        })
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    /// A copy to build the next state from.
    pub(crate) fn draft(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Persist `next` and make it the current collection.
    pub(crate) fn commit(&mut self, next: Vec<T>) -> Result<(), StorageError> {
        db::save(self.storage.as_ref(), self.key, &next)?;
        self.items = next;
        Ok(())
    }
}
