//! RSVP commands.

use tracing::info;

use revelion_core::{EventMode, ParticipantId, RsvpStatus};
use revelion_planner::models::RsvpSubmission;
use revelion_planner::{Planner, PlannerError, Result};

use super::require_dashboard;

/// Parsed `rsvp submit` arguments.
pub struct Submit {
    pub name: Option<String>,
    pub status: RsvpStatus,
    pub event: Option<EventMode>,
    pub dietary: Option<String>,
    /// `None` keeps the guests of an existing RSVP.
    pub guests: Option<Vec<String>>,
}

pub fn submit(planner: &mut Planner, args: Submit) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => planner.require_account()?.name,
    };
    if name.trim().is_empty() {
        return Err(PlannerError::InvalidInput("RSVP name is empty".to_owned()));
    }
    let event = args.event.unwrap_or(planner.config().get().mode);

    let mut submission = RsvpSubmission::new(name, args.status, event);
    if let Some(dietary) = args.dietary {
        submission = submission.with_dietary(dietary);
    }
    if let Some(guests) = args.guests {
        submission = submission.with_guests(guests);
    }

    let record = planner.participants_mut().upsert(submission)?;
    let message = planner.config().rsvp_message(record.status);
    info!("{}", message.title);
    info!("{}", message.message);
    info!("RSVP {} saved for {}", record.id, record.event);
    Ok(())
}

pub fn list(planner: &Planner, event: Option<EventMode>) {
    let event = event.unwrap_or(planner.config().get().mode);
    let participants = planner.participants();
    for p in participants.for_event(event) {
        let guests = if p.guests.is_empty() {
            String::new()
        } else {
            format!(" +{}", p.guests.join(", "))
        };
        let dietary = p
            .dietary
            .as_deref()
            .map(|d| format!(" [{d}]"))
            .unwrap_or_default();
        info!("{}  {:<9} {}{}{}", p.id, p.status.as_str(), p.name, guests, dietary);
    }
    info!("Headcount for {event}: {}", participants.headcount(event));
}

pub fn remove(planner: &mut Planner, id: &str) -> Result<()> {
    require_dashboard(planner)?;
    let id = ParticipantId::new(id);
    if !planner.participants_mut().remove(&id)? {
        return Err(PlannerError::NotFound(format!("RSVP {id}")));
    }
    info!("Removed RSVP {id}");
    Ok(())
}
