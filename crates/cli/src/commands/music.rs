//! Music queue commands.

use tracing::info;

use revelion_core::SongId;
use revelion_planner::{Planner, PlannerError, Result};

pub async fn add(planner: &mut Planner, url: &str) -> Result<()> {
    let account = planner.require_account()?;
    let song = planner.add_song(url, &account).await?;
    info!("Queued \"{}\" (id {})", song.title, song.id);
    Ok(())
}

pub fn vote(planner: &mut Planner, id: &str) -> Result<()> {
    let account = planner.require_account()?;
    let id = SongId::new(id);
    if planner.music().get(&id).is_none() {
        return Err(not_found(&id));
    }

    let voted = planner.music_mut().vote(&id, &account.id)?;
    info!("{} vote on {id}", if voted { "Cast" } else { "Withdrew" });
    Ok(())
}

pub fn remove(planner: &mut Planner, id: &str) -> Result<()> {
    let account = planner.require_account()?;
    let id = SongId::new(id);
    let song = planner.music().get(&id).ok_or_else(|| not_found(&id))?;
    if !song.removable_by(&account) {
        return Err(PlannerError::Forbidden(format!(
            "only the creator of {id} can remove it"
        )));
    }

    planner.music_mut().remove(&id)?;
    info!("Removed {id}");
    Ok(())
}

pub fn list(planner: &Planner) {
    for (rank, song) in planner.music().list().iter().enumerate() {
        info!(
            "{:>2}. {}  {} [{} vote(s)] added by {}  {}",
            rank + 1,
            song.id,
            song.title,
            song.votes(),
            song.added_by,
            song.video_id.watch_url()
        );
    }
}

fn not_found(id: &SongId) -> PlannerError {
    PlannerError::NotFound(format!("song {id}"))
}
