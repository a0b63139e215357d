//! Unified error type for front ends.
//!
//! Store operations return their own narrow errors; `PlannerError` wraps them
//! for callers that drive several stores, such as the CLI.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::StorageError;
use crate::services::title::TitleError;
use crate::stores::{AccountError, MusicError};

/// Planner-level error type.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Persistence failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Account operation rejected or failed.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// Music queue operation rejected or failed.
    #[error("Music error: {0}")]
    Music(#[from] MusicError),

    /// Title lookup failed.
    #[error("Title lookup error: {0}")]
    Title(#[from] TitleError),

    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input was rejected before reaching a store.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No account is logged in.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Logged-in account may not perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, PlannerError>;
