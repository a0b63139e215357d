//! Account commands.

use tracing::info;

use revelion_core::AccountId;
use revelion_planner::{Planner, PlannerError, Result};

use super::require_dashboard;

pub fn register(planner: &mut Planner, name: &str, pin: &str) -> Result<()> {
    let account = planner.accounts_mut().register(name, pin)?;
    info!("Registered and logged in as {} (id {})", account.name, account.id);
    Ok(())
}

pub fn login(planner: &Planner, name: &str, pin: &str) -> Result<()> {
    let account = planner.accounts().login(name, pin)?;
    if account.is_privileged() {
        info!("Logged in as {} (privileged)", account.name);
    } else {
        info!("Logged in as {}", account.name);
    }
    Ok(())
}

pub fn logout(planner: &Planner) -> Result<()> {
    planner.accounts().logout()?;
    info!("Logged out");
    Ok(())
}

pub fn whoami(planner: &Planner) -> Result<()> {
    match planner.accounts().current()? {
        Some(account) => info!("{} (id {})", account.name, account.id),
        None => info!("Not logged in"),
    }
    Ok(())
}

pub fn list(planner: &Planner) -> Result<()> {
    require_dashboard(planner)?;
    let accounts = planner.accounts().list();
    for account in accounts {
        info!(
            "{}  {}  registered {}",
            account.id,
            account.name,
            account.created_at.format("%Y-%m-%d")
        );
    }
    info!("{} account(s)", accounts.len());
    Ok(())
}

pub fn delete(planner: &mut Planner, id: &str) -> Result<()> {
    require_dashboard(planner)?;
    let id = AccountId::new(id);
    if !planner.accounts().list().iter().any(|account| account.id == id) {
        return Err(PlannerError::NotFound(format!("account {id}")));
    }

    planner.accounts_mut().delete(&id)?;
    info!("Deleted account {id}");
    Ok(())
}
