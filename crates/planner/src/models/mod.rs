//! Domain types persisted by the stores.
//!
//! Field names serialize in camelCase and timestamps as epoch milliseconds,
//! matching the stored JSON of earlier releases.

pub mod account;
pub mod config;
pub mod participant;
pub mod shopping;
pub mod song;

pub use account::Account;
pub use config::{AppConfig, ConfigPatch, LocationConfig, LocationPatch, RsvpMessage, RsvpMessages};
pub use participant::{Participant, RsvpSubmission};
pub use shopping::ShoppingItem;
pub use song::Song;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};

/// The current time at the millisecond precision timestamps are stored with.
pub(crate) fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Treat an empty string the same as an absent value.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
