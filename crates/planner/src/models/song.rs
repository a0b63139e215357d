//! Music queue entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use revelion_core::{AccountId, SongId, VideoId};

use super::Account;

/// A song proposed for the party playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub video_id: VideoId,
    pub title: String,
    /// Display name of whoever proposed it.
    pub added_by: String,
    pub added_by_user_id: AccountId,
    /// Voters in voting order, without duplicates.
    #[serde(default)]
    pub voted_by: Vec<AccountId>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Song {
    #[must_use]
    pub fn votes(&self) -> usize {
        self.voted_by.len()
    }

    #[must_use]
    pub fn has_voted(&self, voter: &AccountId) -> bool {
        self.voted_by.contains(voter)
    }

    /// Add or withdraw `voter`'s vote. Returns whether the vote is now cast.
    pub fn toggle_vote(&mut self, voter: &AccountId) -> bool {
        if self.has_voted(voter) {
            self.voted_by.retain(|id| id != voter);
            false
        } else {
            self.voted_by.push(voter.clone());
            true
        }
    }

    /// The proposer and privileged accounts may remove a song.
    #[must_use]
    pub fn removable_by(&self, account: &Account) -> bool {
        account.is_privileged() || self.added_by_user_id == account.id
    }
}
