//! Configuration commands.

use tracing::info;

use revelion_core::{EventMode, RsvpStatus};
use revelion_planner::models::{ConfigPatch, LocationPatch};
use revelion_planner::{Planner, Result};

use super::require_dashboard;

pub fn show(planner: &Planner) {
    let config = planner.config().get();
    info!("Active event: {}", config.mode);
    for mode in EventMode::ALL {
        let location = config.location(mode);
        info!(
            "{mode}: {} at {} ({}, {})",
            location.venue_name, location.date, location.lat, location.lng
        );
    }
    info!("Playlist: {}", config.playlist_url);
    info!("Rules:\n{}", config.rules);
    for status in [RsvpStatus::Confirmed, RsvpStatus::Maybe, RsvpStatus::Declined] {
        let message = config.rsvp_messages.get(status);
        info!("{status} message: {}: {}", message.title, message.message);
    }
}

pub fn set_mode(planner: &mut Planner, mode: EventMode) -> Result<()> {
    update(
        planner,
        ConfigPatch {
            mode: Some(mode),
            ..ConfigPatch::default()
        },
    )?;
    info!("Active event is now {mode}");
    Ok(())
}

pub fn set_location(
    planner: &mut Planner,
    event: Option<EventMode>,
    patch: LocationPatch,
) -> Result<()> {
    require_dashboard(planner)?;
    let event = event.unwrap_or(planner.config().get().mode);
    planner.config_mut().update_location(event, patch)?;
    let location = planner.config().get().location(event);
    info!("{event}: {} at {}", location.venue_name, location.date);
    Ok(())
}

pub fn set_rules(planner: &mut Planner, rules: String) -> Result<()> {
    update(
        planner,
        ConfigPatch {
            rules: Some(rules),
            ..ConfigPatch::default()
        },
    )?;
    info!("Rules updated");
    Ok(())
}

pub fn set_playlist(planner: &mut Planner, url: String) -> Result<()> {
    update(
        planner,
        ConfigPatch {
            playlist_url: Some(url),
            ..ConfigPatch::default()
        },
    )?;
    info!("Playlist updated");
    Ok(())
}

/// Change the title and/or body shown after an RSVP with `status`.
pub fn set_message(
    planner: &mut Planner,
    status: RsvpStatus,
    title: Option<String>,
    message: Option<String>,
) -> Result<()> {
    let mut messages = planner.config().get().rsvp_messages.clone();
    let entry = messages.get_mut(status);
    if let Some(title) = title {
        entry.title = title;
    }
    if let Some(message) = message {
        entry.message = message;
    }
    update(
        planner,
        ConfigPatch {
            rsvp_messages: Some(messages),
            ..ConfigPatch::default()
        },
    )?;
    info!("{status} message updated");
    Ok(())
}

pub fn set_password(planner: &mut Planner, password: String) -> Result<()> {
    update(
        planner,
        ConfigPatch {
            admin_password: Some(password),
            ..ConfigPatch::default()
        },
    )?;
    info!("Dashboard password changed");
    Ok(())
}

fn update(planner: &mut Planner, patch: ConfigPatch) -> Result<()> {
    require_dashboard(planner)?;
    planner.config_mut().update(patch)?;
    Ok(())
}
