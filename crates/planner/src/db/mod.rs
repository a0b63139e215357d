//! Durable storage for the planner's collections.
//!
//! A [`Storage`] holds JSON text by key, in the manner of browser local
//! storage. Each collection lives under its own versioned key (see [`keys`]);
//! when a stored shape changes the key is bumped rather than migrated here.
//!
//! # Backends
//!
//! - [`FileStorage`] - one `<key>.json` file per key, replaced atomically
//! - [`MemoryStorage`] - process-local map, used for tests and ephemeral sessions

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys, one per collection.
pub mod keys {
    /// Application configuration.
    pub const CONFIG: &str = "revelion_config_v4";

    /// Registered accounts.
    pub const ACCOUNTS: &str = "revelion_users";

    /// RSVP records for both events.
    pub const PARTICIPANTS: &str = "revelion_participants_v3";

    /// Shopping list.
    pub const SHOPPING: &str = "revelion_shopping_v2";

    /// Music queue.
    pub const MUSIC: &str = "revelion_music_v3";

    /// Session-scoped active account.
    pub const SESSION_ACCOUNT: &str = "revelion_session";

    /// Session-scoped dashboard unlock flag.
    pub const SESSION_ADMIN: &str = "revelion_admin_auth";
}

/// Errors from reading or writing durable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded as JSON.
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored payload is not valid for the expected shape.
    #[error("corrupt data under {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters that cannot name a storage slot.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the storage lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Key/value storage of JSON text.
///
/// Writes replace the whole value; a subsequent `read` never observes a
/// partially written value.
pub trait Storage: Send + Sync {
    /// Read the raw value under `key`. A missing key is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load and decode the value under `key`.
///
/// # Errors
///
/// Returns `StorageError::Corrupt` if the stored JSON does not decode as `T`,
/// or any backend error.
pub fn load<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.read(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_owned(),
            source,
        })
}

/// Encode `value` and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialize` if encoding fails, or any backend error.
pub fn save<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_owned(),
        source,
    })?;
    storage.write(key, &raw)
}

/// Keys name files on disk, so only `[a-z0-9_]` is accepted.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_key_is_none() {
        let storage = MemoryStorage::new();
        let loaded: Option<Vec<String>> = load(&storage, keys::SHOPPING).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        save(&storage, keys::MUSIC, &vec!["a", "b"]).unwrap();
        let loaded: Option<Vec<String>> = load(&storage, keys::MUSIC).unwrap();
        assert_eq!(loaded.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_load_corrupt_payload() {
        let storage = MemoryStorage::new();
        storage.write(keys::ACCOUNTS, "{not json").unwrap();
        let result: Result<Option<Vec<String>>, _> = load(&storage, keys::ACCOUNTS);
        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key(keys::CONFIG).is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("Upper").is_err());
    }
}
