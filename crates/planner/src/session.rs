//! Session-scoped state.
//!
//! Holds the active account and the dashboard-unlocked flag. Both live only
//! as long as the session's backing storage: a [`MemoryStorage`] for one
//! process, or a dedicated directory that a front end clears on logout.

use std::sync::Arc;

use tracing::info;

use crate::db::{self, MemoryStorage, Storage, StorageError, keys};
use crate::models::Account;

/// Whether an operation ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    /// The session is as it was.
    Unchanged,
    /// Active account and dashboard unlock were cleared; front ends should
    /// return to their default view.
    Cleared,
}

/// Handle to session-scoped values. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl Session {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// A session that ends when the last clone is dropped.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// The account currently logged in, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if session storage cannot be read.
    pub fn current_account(&self) -> Result<Option<Account>, StorageError> {
        db::load(self.storage.as_ref(), keys::SESSION_ACCOUNT)
    }

    pub(crate) fn set_current_account(&self, account: &Account) -> Result<(), StorageError> {
        db::save(self.storage.as_ref(), keys::SESSION_ACCOUNT, account)
    }

    /// Whether the admin dashboard has been unlocked this session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if session storage cannot be read.
    pub fn is_admin_unlocked(&self) -> Result<bool, StorageError> {
        Ok(db::load::<bool>(self.storage.as_ref(), keys::SESSION_ADMIN)?.unwrap_or(false))
    }

    pub(crate) fn set_admin_unlocked(&self, unlocked: bool) -> Result<(), StorageError> {
        if unlocked {
            db::save(self.storage.as_ref(), keys::SESSION_ADMIN, &true)
        } else {
            self.storage.remove(keys::SESSION_ADMIN)
        }
    }

    /// End the session: forget the active account and the dashboard unlock.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if session storage cannot be written.
    pub fn clear(&self) -> Result<SessionChange, StorageError> {
        self.storage.remove(keys::SESSION_ACCOUNT)?;
        self.storage.remove(keys::SESSION_ADMIN)?;
        info!("Session cleared");
        Ok(SessionChange::Cleared)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
