//! RSVP records.

use serde::{Deserialize, Serialize};

use revelion_core::{EventMode, GuestsShape, ParticipantId, RsvpStatus};

/// One person's RSVP for one event.
///
/// At most one record exists per (case-insensitive name, event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub status: RsvpStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<String>,
    /// Extra guests brought along, in order. Stored legacy shapes are
    /// normalized on read.
    #[serde(
        default,
        deserialize_with = "revelion_core::types::guests::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub guests: Vec<String>,
    pub event: EventMode,
}

impl Participant {
    /// Whether this record belongs to `name` (ignoring case) at `event`.
    #[must_use]
    pub fn matches(&self, name: &str, event: EventMode) -> bool {
        self.event == event && self.name.to_lowercase() == name.to_lowercase()
    }

    /// The participant plus their guests.
    #[must_use]
    pub fn party_size(&self) -> usize {
        1 + self.guests.len()
    }
}

/// An RSVP as submitted, without an id.
///
/// When it updates an existing record, `None` fields keep their prior value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpSubmission {
    pub name: String,
    pub status: RsvpStatus,
    pub dietary: Option<String>,
    pub guests: Option<GuestsShape>,
    pub event: EventMode,
}

impl RsvpSubmission {
    #[must_use]
    pub fn new(name: impl Into<String>, status: RsvpStatus, event: EventMode) -> Self {
        Self {
            name: name.into(),
            status,
            dietary: None,
            guests: None,
            event,
        }
    }

    #[must_use]
    pub fn with_dietary(mut self, dietary: impl Into<String>) -> Self {
        self.dietary = Some(dietary.into());
        self
    }

    #[must_use]
    pub fn with_guests(mut self, guests: impl Into<GuestsShape>) -> Self {
        self.guests = Some(guests.into());
        self
    }
}
