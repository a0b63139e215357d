//! Dashboard commands.

use tracing::{info, warn};

use revelion_core::EventMode;
use revelion_planner::{Planner, PlannerError, Result};

use super::require_dashboard;

pub fn unlock(planner: &Planner, password: &str) -> Result<()> {
    if !planner.config().login_admin(password)? {
        warn!("Wrong dashboard password");
        return Err(PlannerError::Forbidden("wrong dashboard password".to_owned()));
    }
    info!("Dashboard unlocked");
    Ok(())
}

pub fn lock(planner: &Planner) -> Result<()> {
    planner.config().logout_admin()?;
    info!("Dashboard locked");
    Ok(())
}

pub fn stats(planner: &Planner, event: Option<EventMode>) -> Result<()> {
    require_dashboard(planner)?;
    let event = event.unwrap_or(planner.config().get().mode);
    let dashboard = planner.dashboard(event);

    info!("Confirmed RSVPs: {}", dashboard.confirmed);
    info!(
        "Shopping: {}/{} bought",
        dashboard.bought_items, dashboard.total_items
    );
    info!("Accounts: {}", dashboard.accounts);
    info!("Guest list for {event}:");
    for p in &dashboard.event.guests {
        info!("  {:<9} {} (+{})", p.status.as_str(), p.name, p.guests.len());
    }
    info!("Headcount: {}", dashboard.event.headcount);
    Ok(())
}
