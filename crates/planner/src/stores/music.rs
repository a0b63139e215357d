//! Music queue store.
//!
//! Adding a song happens in two phases:
//!
//! 1. [`MusicStore::resolve`] extracts the video id and rejects duplicates.
//! 2. The title is looked up (best effort, may fall back to a placeholder),
//!    then [`MusicStore::insert`] checks for duplicates again and prepends
//!    the song.
//!
//! Two submissions of the same link racing through the lookup are resolved at
//! insertion: the second insert is rejected as a duplicate.
//!
//! After every vote the queue is re-sorted by vote count, highest first;
//! songs with equal votes keep their relative order.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use revelion_core::{AccountId, SongId, VideoId};

use super::Collection;
use crate::db::{Storage, StorageError, keys};
use crate::models::{Song, now_millis};
use crate::services::title::{TitleLookup, title_or_placeholder};

/// Errors that can occur when adding a song.
///
/// `InvalidUrl` and `Duplicate` leave the queue unchanged.
#[derive(Debug, Error)]
pub enum MusicError {
    /// The link carries no valid video id.
    #[error("no video id in link: {0}")]
    InvalidUrl(String),

    /// A song with this video id is already queued.
    #[error("video {0} is already queued")]
    Duplicate(VideoId),

    /// Storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// The collaborative music queue.
pub struct MusicStore {
    songs: Collection<Song>,
}

impl MusicStore {
    /// Load the stored queue.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored queue cannot be read.
    pub fn open(storage: Arc<dyn Storage>) -> Result<Self, StorageError> {
        Ok(Self {
            songs: Collection::open(storage, keys::MUSIC)?,
        })
    }

    /// Songs in display order.
    #[must_use]
    pub fn list(&self) -> &[Song] {
        self.songs.items()
    }

    #[must_use]
    pub fn get(&self, id: &SongId) -> Option<&Song> {
        self.list().iter().find(|song| &song.id == id)
    }

    #[must_use]
    pub fn contains_video(&self, video_id: &VideoId) -> bool {
        self.list().iter().any(|song| &song.video_id == video_id)
    }

    /// Phase one: extract the video id from `url` and check it is new.
    ///
    /// # Errors
    ///
    /// Returns `MusicError::InvalidUrl` or `MusicError::Duplicate`.
    pub fn resolve(&self, url: &str) -> Result<VideoId, MusicError> {
        let video_id =
            VideoId::extract(url).ok_or_else(|| MusicError::InvalidUrl(url.to_owned()))?;
        if self.contains_video(&video_id) {
            return Err(MusicError::Duplicate(video_id));
        }
        Ok(video_id)
    }

    /// Phase two: prepend a song with an already-resolved title.
    ///
    /// # Errors
    ///
    /// Returns `MusicError::Duplicate` if the video was queued meanwhile.
    /// Returns `MusicError::Storage` if the queue cannot be persisted.
    pub fn insert(
        &mut self,
        video_id: VideoId,
        title: String,
        added_by: &str,
        added_by_user_id: &AccountId,
    ) -> Result<Song, MusicError> {
        if self.contains_video(&video_id) {
            return Err(MusicError::Duplicate(video_id));
        }

        let song = Song {
            id: SongId::generate(),
            video_id,
            title,
            added_by: added_by.to_owned(),
            added_by_user_id: added_by_user_id.clone(),
            voted_by: Vec::new(),
            created_at: now_millis(),
        };

        let mut next = Vec::with_capacity(self.list().len() + 1);
        next.push(song.clone());
        next.extend_from_slice(self.list());
        self.songs.commit(next)?;

        info!(song_id = %song.id, video_id = %song.video_id, "Song added");
        Ok(song)
    }

    /// Resolve, look up the title, and insert.
    ///
    /// # Errors
    ///
    /// Returns `MusicError::InvalidUrl` or `MusicError::Duplicate` without
    /// touching the queue. A failed title lookup is not an error.
    pub async fn add_song<L: TitleLookup + Sync>(
        &mut self,
        lookup: &L,
        url: &str,
        added_by: &str,
        added_by_user_id: &AccountId,
    ) -> Result<Song, MusicError> {
        let video_id = self.resolve(url)?;
        let title = title_or_placeholder(lookup, &video_id).await;
        self.insert(video_id, title, added_by, added_by_user_id)
    }

    /// Toggle `voter`'s vote on a song and re-sort the queue.
    ///
    /// Returns whether the vote is now cast (`false` also for unknown songs).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the queue cannot be persisted.
    pub fn vote(&mut self, id: &SongId, voter: &AccountId) -> Result<bool, StorageError> {
        let mut next = self.songs.draft();
        let voted = next
            .iter_mut()
            .find(|song| &song.id == id)
            .is_some_and(|song| song.toggle_vote(voter));

        // Vec::sort_by is stable, so ties keep their order.
        next.sort_by(|a, b| b.votes().cmp(&a.votes()));
        self.songs.commit(next)?;

        info!(song_id = %id, voter = %voter, voted, "Vote toggled");
        Ok(voted)
    }

    /// Remove a song. Returns whether it was queued.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the queue cannot be persisted.
    pub fn remove(&mut self, id: &SongId) -> Result<bool, StorageError> {
        let mut next = self.songs.draft();
        next.retain(|song| &song.id != id);
        if next.len() == self.list().len() {
            return Ok(false);
        }
        self.songs.commit(next)?;
        info!(song_id = %id, "Song removed");
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;
    use crate::services::title::PLACEHOLDER_TITLE;
    use crate::services::title::tests::StubLookup;

    fn store() -> MusicStore {
        MusicStore::open(Arc::new(MemoryStorage::new())).unwrap()
    }

    fn user(id: &str) -> AccountId {
        AccountId::new(id)
    }

    fn video(n: u8) -> String {
        format!("https://youtu.be/video{n:06}")
    }

    #[tokio::test]
    async fn test_add_song_prepends() {
        let mut store = store();
        let lookup = StubLookup(Some("Song"));
        let first = store.add_song(&lookup, &video(1), "Ana", &user("u1")).await.unwrap();
        let second = store.add_song(&lookup, &video(2), "Ion", &user("u2")).await.unwrap();

        let ids: Vec<_> = store.list().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(store.list()[0].title, "Song");
    }

    #[tokio::test]
    async fn test_add_song_rejects_invalid_and_duplicate() {
        let mut store = store();
        let lookup = StubLookup(Some("Song"));

        assert!(matches!(
            store.add_song(&lookup, "https://youtu.be/short", "Ana", &user("u1")).await,
            Err(MusicError::InvalidUrl(_))
        ));

        store
            .add_song(&lookup, "https://youtu.be/abc12345678", "Ana", &user("u1"))
            .await
            .unwrap();
        assert!(matches!(
            store
                .add_song(
                    &lookup,
                    "https://www.youtube.com/watch?v=abc12345678",
                    "Ion",
                    &user("u2")
                )
                .await,
            Err(MusicError::Duplicate(_))
        ));
        assert_eq!(store.list().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_uses_placeholder() {
        let mut store = store();
        let song = store
            .add_song(&StubLookup(None), &video(1), "Ana", &user("u1"))
            .await
            .unwrap();
        assert_eq!(song.title, PLACEHOLDER_TITLE);
    }

    #[test]
    fn test_insert_rechecks_duplicates() {
        let mut store = store();
        let first = store.resolve(&video(1)).unwrap();
        let racing = store.resolve(&video(1)).unwrap();

        store.insert(first, "A".to_owned(), "Ana", &user("u1")).unwrap();
        assert!(matches!(
            store.insert(racing, "A".to_owned(), "Ion", &user("u2")),
            Err(MusicError::Duplicate(_))
        ));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_inserted_song_matches_stored() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let mut store = MusicStore::open(Arc::clone(&storage)).unwrap();
        let id = store.resolve(&video(1)).unwrap();
        let song = store.insert(id, "A".to_owned(), "Ana", &user("u1")).unwrap();

        let stored = crate::db::load::<Vec<Song>>(storage.as_ref(), keys::MUSIC)
            .unwrap()
            .unwrap();
        assert_eq!(stored, vec![song.clone()]);
        assert_eq!(MusicStore::open(storage).unwrap().get(&song.id), Some(&song));
    }

    #[test]
    fn test_vote_toggles_and_sorts_stably() {
        let mut store = store();
        let mut ids = Vec::new();
        for n in 1..=4 {
            let id = store.resolve(&video(n)).unwrap();
            ids.push(store.insert(id, format!("{n}"), "Ana", &user("u1")).unwrap().id);
        }
        // Display order is newest first: 4, 3, 2, 1.
        assert!(store.vote(&ids[1], &user("a")).unwrap());
        let titles: Vec<_> = store.list().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["2", "4", "3", "1"]);

        assert!(store.vote(&ids[0], &user("a")).unwrap());
        assert!(store.vote(&ids[0], &user("b")).unwrap());
        let titles: Vec<_> = store.list().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["1", "2", "4", "3"]);

        assert!(!store.vote(&ids[0], &user("b")).unwrap());
        assert!(!store.vote(&ids[0], &user("a")).unwrap());
        let titles: Vec<_> = store.list().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["2", "1", "4", "3"]);
        assert_eq!(store.get(&ids[0]).unwrap().votes(), 0);
    }

    #[test]
    fn test_vote_unknown_song() {
        let mut store = store();
        assert!(!store.vote(&SongId::new("missing"), &user("a")).unwrap());
    }

    #[test]
    fn test_remove_song() {
        let mut store = store();
        let id = store.resolve(&video(1)).unwrap();
        let song = store.insert(id, "A".to_owned(), "Ana", &user("u1")).unwrap();

        assert!(store.remove(&song.id).unwrap());
        assert!(!store.remove(&song.id).unwrap());
        assert!(store.list().is_empty());
    }
}
