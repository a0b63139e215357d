//! Account store.
//!
//! Name + PIN registration and login. The active account is session-scoped;
//! the built-in privileged account can always log in, whether or not any
//! account is stored.

mod error;

pub use error::AccountError;

use std::sync::Arc;

use tracing::{info, warn};

use revelion_core::AccountId;

use super::Collection;
use crate::db::{Storage, StorageError, keys};
use crate::models::{Account, now_millis};
use crate::models::account::{MIN_PIN_LENGTH, PRIVILEGED_LOGIN, PRIVILEGED_PIN};
use crate::session::{Session, SessionChange};

/// Registered accounts plus the session's active account.
pub struct AccountStore {
    accounts: Collection<Account>,
    session: Session,
}

impl AccountStore {
    /// Load stored accounts.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored accounts cannot be read.
    pub fn open(storage: Arc<dyn Storage>, session: Session) -> Result<Self, StorageError> {
        Ok(Self {
            accounts: Collection::open(storage, keys::ACCOUNTS)?,
            session,
        })
    }

    /// All stored accounts, in registration order.
    #[must_use]
    pub fn list(&self) -> &[Account] {
        self.accounts.items()
    }

    /// The session's active account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if session storage cannot be read.
    pub fn current(&self) -> Result<Option<Account>, StorageError> {
        self.session.current_account()
    }

    /// Log in by name (ignoring case) and PIN.
    ///
    /// The privileged login always succeeds with its fixed PIN. On failure
    /// the existing session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCredentials` if nothing matches.
    /// Returns `AccountError::Storage` if the session cannot be written.
    pub fn login(&self, name: &str, pin: &str) -> Result<Account, AccountError> {
        let account = if name.to_lowercase() == PRIVILEGED_LOGIN && pin == PRIVILEGED_PIN {
            Account::privileged()
        } else {
            self.list()
                .iter()
                .find(|account| account.has_name(name) && account.pin == pin)
                .cloned()
                .ok_or_else(|| {
                    warn!(name, "Login rejected");
                    AccountError::InvalidCredentials
                })?
        };

        self.session.set_current_account(&account)?;
        info!(account_id = %account.id, "Logged in");
        Ok(account)
    }

    /// Register a new account and log it in.
    ///
    /// Either both happen or neither: if the session cannot be written the
    /// new account is removed again.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::EmptyName`, `AccountError::PinTooShort`, or
    /// `AccountError::NameTaken` without changing anything.
    /// Returns `AccountError::Storage` if the accounts or session cannot be
    /// persisted.
    pub fn register(&mut self, name: &str, pin: &str) -> Result<Account, AccountError> {
        if name.trim().is_empty() {
            return Err(AccountError::EmptyName);
        }
        if pin.chars().count() < MIN_PIN_LENGTH {
            return Err(AccountError::PinTooShort {
                min: MIN_PIN_LENGTH,
            });
        }
        if self.list().iter().any(|account| account.has_name(name)) {
            return Err(AccountError::NameTaken(name.to_owned()));
        }

        let account = Account {
            id: AccountId::generate(),
            name: name.to_owned(),
            pin: pin.to_owned(),
            is_admin: false,
            created_at: now_millis(),
        };

        let previous = self.accounts.draft();
        let mut next = previous.clone();
        next.push(account.clone());
        self.accounts.commit(next)?;

        if let Err(e) = self.session.set_current_account(&account) {
            if let Err(rollback) = self.accounts.commit(previous) {
                warn!(error = %rollback, "Failed to roll back registration");
            }
            return Err(e.into());
        }

        info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    /// End the session (active account and dashboard unlock).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if session storage cannot be written.
    pub fn logout(&self) -> Result<SessionChange, StorageError> {
        self.session.clear()
    }

    /// Delete an account. Deleting the active account also logs out.
    ///
    /// Unknown ids are ignored. The session is read before anything is
    /// written, so a failed read leaves the account in place.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the accounts or session cannot be written.
    pub fn delete(&mut self, id: &AccountId) -> Result<SessionChange, StorageError> {
        let mut next = self.accounts.draft();
        next.retain(|account| &account.id != id);
        if next.len() == self.list().len() {
            return Ok(SessionChange::Unchanged);
        }

        let was_active = self
            .session
            .current_account()?
            .is_some_and(|current| &current.id == id);
        self.accounts.commit(next)?;
        info!(account_id = %id, "Account deleted");

        if was_active {
            return self.logout();
        }
        Ok(SessionChange::Unchanged)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;
    use crate::stores::testing::FlakyStorage;

    fn store() -> AccountStore {
        AccountStore::open(Arc::new(MemoryStorage::new()), Session::in_memory()).unwrap()
    }

    #[test]
    fn test_register_logs_in() {
        let mut store = store();
        let account = store.register("Ana", "1111").unwrap();
        assert!(!account.is_admin);
        assert_eq!(store.current().unwrap(), Some(account));
    }

    #[test]
    fn test_register_duplicate_name_ignores_case() {
        let mut store = store();
        store.register("Ana", "1111").unwrap();

        let result = store.register("aNA", "2222");
        assert!(matches!(result, Err(AccountError::NameTaken(_))));
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.current().unwrap().unwrap().pin, "1111");
    }

    #[test]
    fn test_register_validates_input() {
        let mut store = store();
        assert!(matches!(
            store.register("  ", "1111"),
            Err(AccountError::EmptyName)
        ));
        assert!(matches!(
            store.register("Ion", "12"),
            Err(AccountError::PinTooShort { min: 4 })
        ));
        assert!(store.list().is_empty());
        assert!(store.current().unwrap().is_none());
    }

    #[test]
    fn test_login_by_name_and_pin() {
        let mut store = store();
        let ana = store.register("Ana", "1111").unwrap();
        store.logout().unwrap();

        assert_eq!(store.login("ana", "1111").unwrap(), ana);
        assert_eq!(store.current().unwrap(), Some(ana));
    }

    #[test]
    fn test_failed_login_keeps_session() {
        let mut store = store();
        let ana = store.register("Ana", "1111").unwrap();

        assert!(matches!(
            store.login("Ana", "9999"),
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            store.login("Nobody", "1111"),
            Err(AccountError::InvalidCredentials)
        ));
        assert_eq!(store.current().unwrap(), Some(ana));
    }

    #[test]
    fn test_privileged_login_without_accounts() {
        let store = store();
        let admin = store.login("ADMIN", "1234").unwrap();
        assert!(admin.is_privileged());
        assert_eq!(store.current().unwrap(), Some(Account::privileged()));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_privileged_login_wrong_pin() {
        let store = store();
        assert!(store.login("admin", "0000").is_err());
    }

    #[test]
    fn test_delete_active_account_logs_out() {
        let mut store = store();
        store.register("Ana", "1111").unwrap();
        let ion = store.register("Ion", "2222").unwrap();

        assert_eq!(store.delete(&ion.id).unwrap(), SessionChange::Cleared);
        assert!(store.current().unwrap().is_none());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_delete_other_account_keeps_session() {
        let mut store = store();
        let ana = store.register("Ana", "1111").unwrap();
        store.login("admin", "1234").unwrap();

        assert_eq!(store.delete(&ana.id).unwrap(), SessionChange::Unchanged);
        assert!(store.current().unwrap().unwrap().is_privileged());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut store = store();
        store.register("Ana", "1111").unwrap();
        assert_eq!(
            store.delete(&AccountId::new("missing")).unwrap(),
            SessionChange::Unchanged
        );
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_register_write_failure_does_not_log_in() {
        let storage = Arc::new(FlakyStorage::default());
        let mut store = AccountStore::open(storage.clone(), Session::in_memory()).unwrap();
        storage.fail();

        assert!(matches!(
            store.register("Ana", "1111"),
            Err(AccountError::Storage(_))
        ));
        assert!(store.list().is_empty());
        assert!(store.current().unwrap().is_none());
    }

    #[test]
    fn test_registered_account_matches_stored() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = AccountStore::open(Arc::clone(&storage), Session::in_memory()).unwrap();
        let ana = store.register("Ana", "1111").unwrap();

        let stored = crate::db::load::<Vec<Account>>(storage.as_ref(), keys::ACCOUNTS)
            .unwrap()
            .unwrap();
        assert_eq!(stored, vec![ana.clone()]);
        assert_eq!(store.current().unwrap(), Some(ana.clone()));

        let reopened = AccountStore::open(storage, Session::in_memory()).unwrap();
        assert_eq!(reopened.list(), &[ana]);
    }

    #[test]
    fn test_register_session_failure_rolls_back() {
        let accounts: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let session_storage = Arc::new(FlakyStorage::default());
        let mut store = AccountStore::open(
            Arc::clone(&accounts),
            Session::new(session_storage.clone()),
        )
        .unwrap();
        session_storage.fail();

        assert!(matches!(
            store.register("Ana", "1111"),
            Err(AccountError::Storage(_))
        ));
        assert!(store.list().is_empty());
        let stored = crate::db::load::<Vec<Account>>(accounts.as_ref(), keys::ACCOUNTS).unwrap();
        assert!(stored.unwrap_or_default().is_empty());

        session_storage.recover();
        let ana = store.register("Ana", "1111").unwrap();
        assert_eq!(store.current().unwrap(), Some(ana));
    }

    #[test]
    fn test_delete_session_read_failure_keeps_account() {
        let accounts: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let session_storage = Arc::new(FlakyStorage::default());
        let mut store = AccountStore::open(
            Arc::clone(&accounts),
            Session::new(session_storage.clone()),
        )
        .unwrap();
        let ana = store.register("Ana", "1111").unwrap();
        session_storage.fail_reads();

        assert!(store.delete(&ana.id).is_err());
        assert_eq!(store.list(), &[ana.clone()]);
        let stored = crate::db::load::<Vec<Account>>(accounts.as_ref(), keys::ACCOUNTS)
            .unwrap()
            .unwrap();
        assert_eq!(stored, vec![ana.clone()]);

        session_storage.recover();
        assert_eq!(store.delete(&ana.id).unwrap(), SessionChange::Cleared);
        assert!(store.current().unwrap().is_none());
    }

    #[test]
    fn test_accounts_survive_reopen() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = AccountStore::open(Arc::clone(&storage), Session::in_memory()).unwrap();
        store.register("Ana", "1111").unwrap();

        let reopened = AccountStore::open(storage, Session::in_memory()).unwrap();
        assert_eq!(reopened.list().len(), 1);
        assert!(reopened.current().unwrap().is_none());
    }
}
