//! Shopping list commands.

use tracing::info;

use revelion_core::ItemId;
use revelion_planner::{Planner, PlannerError, Result};

pub fn add(planner: &mut Planner, name: &str) -> Result<()> {
    let account = planner.require_account()?;
    if name.trim().is_empty() {
        return Err(PlannerError::InvalidInput("item name is empty".to_owned()));
    }
    let item = planner.shopping_mut().add(name, &account.id)?;
    info!("Added {} (id {})", item.name, item.id);
    Ok(())
}

pub fn claim(planner: &mut Planner, id: &str, claimant: Option<&str>) -> Result<()> {
    let claimant = match claimant {
        Some(name) => name.to_owned(),
        None => planner.require_account()?.name,
    };
    let id = ItemId::new(id);
    if !planner.shopping_mut().claim(&id, &claimant)? {
        return Err(not_found(&id));
    }
    if claimant.is_empty() {
        info!("Released {id}");
    } else {
        info!("{claimant} brings {id}");
    }
    Ok(())
}

pub fn release(planner: &mut Planner, id: &str) -> Result<()> {
    claim(planner, id, Some(""))
}

pub fn check(planner: &mut Planner, id: &str) -> Result<()> {
    let id = ItemId::new(id);
    if !planner.shopping_mut().toggle_checked(&id)? {
        return Err(not_found(&id));
    }
    let checked = planner.shopping().get(&id).is_some_and(|item| item.checked);
    info!("{id} is {}", if checked { "bought" } else { "not bought" });
    Ok(())
}

pub fn remove(planner: &mut Planner, id: &str) -> Result<()> {
    let account = planner.require_account()?;
    let id = ItemId::new(id);
    let item = planner.shopping().get(&id).ok_or_else(|| not_found(&id))?;
    if !item.removable_by(&account) {
        return Err(PlannerError::Forbidden(format!(
            "only the creator of {id} can remove it"
        )));
    }

    planner.shopping_mut().remove(&id)?;
    info!("Removed {id}");
    Ok(())
}

pub fn list(planner: &Planner) {
    let items = planner.shopping().list();
    for item in items {
        let mark = if item.checked { "x" } else { " " };
        let claim = item
            .claimed_by
            .as_deref()
            .map(|name| format!(" ({name})"))
            .unwrap_or_default();
        info!("[{mark}] {}  {}{claim}", item.id, item.name);
    }
    let bought = items.iter().filter(|item| item.checked).count();
    info!("{bought}/{} bought", items.len());
}

fn not_found(id: &ItemId) -> PlannerError {
    PlannerError::NotFound(format!("shopping item {id}"))
}
