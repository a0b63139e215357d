//! Admin dashboard statistics.

use serde::Serialize;

use revelion_core::{EventMode, RsvpStatus};

use crate::models::Participant;
use crate::stores::{AccountStore, ParticipantStore, ShoppingStore};

/// Guest list and headcount for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub event: EventMode,
    pub guests: Vec<Participant>,
    pub headcount: usize,
}

/// Snapshot of the dashboard counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Confirmed RSVPs across both events.
    pub confirmed: usize,
    pub bought_items: usize,
    pub total_items: usize,
    pub accounts: usize,
    pub event: EventSummary,
}

impl Dashboard {
    /// Collect counters, with the guest list filtered to `event`.
    #[must_use]
    pub fn collect(
        accounts: &AccountStore,
        participants: &ParticipantStore,
        shopping: &ShoppingStore,
        event: EventMode,
    ) -> Self {
        let confirmed = participants
            .list_all()
            .iter()
            .filter(|p| p.status == RsvpStatus::Confirmed)
            .count();
        let items = shopping.list();

        Self {
            confirmed,
            bought_items: items.iter().filter(|item| item.checked).count(),
            total_items: items.len(),
            accounts: accounts.list().len(),
            event: EventSummary {
                event,
                guests: participants.for_event(event).cloned().collect(),
                headcount: participants.headcount(event),
            },
        }
    }
}
