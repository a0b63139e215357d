//! RSVP store.
//!
//! Keeps at most one record per (case-insensitive name, event). Submitting
//! again for the same pair updates the record in place.

use std::sync::Arc;

use tracing::info;

use revelion_core::{EventMode, ParticipantId, RsvpStatus};

use super::Collection;
use crate::db::{Storage, StorageError, keys};
use crate::models::{Participant, RsvpSubmission};

/// RSVP records for both events.
pub struct ParticipantStore {
    participants: Collection<Participant>,
}

impl ParticipantStore {
    /// Load stored RSVPs; legacy guest shapes are normalized while reading.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored records cannot be read.
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StorageError> {
        Ok(Self {
            participants: Collection::open(storage, keys::PARTICIPANTS)?,
        })
    }

    #[must_use]
    pub fn list_all(&self) -> &[Participant] {
        self.participants.items()
    }

    pub fn for_event(&self, event: EventMode) -> impl Iterator<Item = &Participant> {
        self.list_all().iter().filter(move |p| p.event == event)
    }

    /// The record for `name` (ignoring case) at `event`.
    #[must_use]
    pub fn find(&self, name: &str, event: EventMode) -> Option<&Participant> {
        self.list_all().iter().find(|p| p.matches(name, event))
    }

    /// Confirmed participants at `event` plus their guests.
    #[must_use]
    pub fn headcount(&self, event: EventMode) -> usize {
        self.for_event(event)
            .filter(|p| p.status == RsvpStatus::Confirmed)
            .map(Participant::party_size)
            .sum()
    }

    /// Create or update the RSVP for the submission's (name, event).
    ///
    /// On update, the submitted name and status overwrite the record;
    /// dietary notes and guests are only overwritten when present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be persisted.
    pub fn upsert(&mut self, submission: RsvpSubmission) -> Result<Participant, StorageError> {
        let RsvpSubmission {
            name,
            status,
            dietary,
            guests,
            event,
        } = submission;
        let guests = guests.map(|shape| shape.normalize());

        let mut next = self.participants.draft();
        let record = if let Some(existing) = next.iter_mut().find(|p| p.matches(&name, event)) {
            existing.name = name;
            existing.status = status;
            if let Some(dietary) = dietary {
                existing.dietary = Some(dietary);
            }
            if let Some(guests) = guests {
                existing.guests = guests;
            }
            info!(participant_id = %existing.id, %event, "RSVP updated");
            existing.clone()
        } else {
            let participant = Participant {
                id: ParticipantId::generate(),
                name,
                status,
                dietary,
                guests: guests.unwrap_or_default(),
                event,
            };
            info!(participant_id = %participant.id, %event, "RSVP created");
            next.push(participant.clone());
            participant
        };

        self.participants.commit(next)?;
        Ok(record)
    }

    /// Delete an RSVP. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be persisted.
    pub fn remove(&mut self, id: &ParticipantId) -> Result<bool, StorageError> {
        let mut next = self.participants.draft();
        next.retain(|p| &p.id != id);
        if next.len() == self.list_all().len() {
            return Ok(false);
        }
        self.participants.commit(next)?;
        info!(participant_id = %id, "RSVP removed");
        Ok(true)
    }
}
