//! Command implementations, one module per command group.

pub mod account;
pub mod admin;
pub mod config;
pub mod music;
pub mod rsvp;
pub mod shop;

use revelion_planner::{Planner, PlannerError, Result};

/// Fail unless the dashboard is unlocked in this session.
fn require_dashboard(planner: &Planner) -> Result<()> {
    if planner.config().is_admin_logged_in()? {
        Ok(())
    } else {
        Err(PlannerError::Forbidden(
            "dashboard is locked; run `rv-cli admin unlock`".to_owned(),
        ))
    }
}
