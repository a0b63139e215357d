//! Account error types.

use thiserror::Error;

use crate::db::StorageError;

/// Errors that can occur during account operations.
///
/// Every variant except `Storage` is a rejection with no side effect.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Name is empty or whitespace.
    #[error("name cannot be empty")]
    EmptyName,

    /// Another account already uses this name (ignoring case).
    #[error("an account named {0} already exists")]
    NameTaken(String),

    /// PIN shorter than the minimum.
    #[error("PIN must be at least {min} characters")]
    PinTooShort {
        /// Minimum length.
        min: usize,
    },

    /// Unknown name or wrong PIN.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
