//! Planner state: one instance of every store over shared storage.

use std::sync::Arc;

use tracing::info;

use revelion_core::EventMode;

use crate::config::PlannerConfig;
use crate::db::{FileStorage, Storage, StorageError};
use crate::error::{PlannerError, Result};
use crate::models::{Account, Song};
use crate::services::{Dashboard, OEmbedClient};
use crate::session::Session;
use crate::stores::{
    AccountStore, ConfigStore, MusicError, MusicStore, ParticipantStore, ShoppingStore,
};

/// Entry point for front ends.
///
/// Owns the session, the stores and the title lookup client.
pub struct Planner {
    session: Session,
    config: ConfigStore,
    accounts: AccountStore,
    participants: ParticipantStore,
    shopping: ShoppingStore,
    music: MusicStore,
    titles: OEmbedClient,
}

impl Planner {
    /// Load every store from `storage`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any stored collection cannot be read.
    pub fn open(
        storage: Arc<dyn Storage>,
        session: Session,
        titles: OEmbedClient,
    ) -> std::result::Result<Self, StorageError> {
        Ok(Self {
            config: ConfigStore::open(Arc::clone(&storage), session.clone())?,
            accounts: AccountStore::open(Arc::clone(&storage), session.clone())?,
            participants: ParticipantStore::open(Arc::clone(&storage))?,
            shopping: ShoppingStore::open(Arc::clone(&storage))?,
            music: MusicStore::open(storage)?,
            session,
            titles,
        })
    }

    /// Open file-backed stores as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Storage` if a directory cannot be created or a
    /// stored collection cannot be read.
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let storage = FileStorage::open(&config.data_dir)?;
        let session = Session::new(Arc::new(FileStorage::open(&config.session_dir)?));
        let titles = OEmbedClient::new(config.oembed_url.as_str(), config.title_cache_ttl);

        let planner = Self::open(Arc::new(storage), session, titles)?;
        info!(data_dir = %config.data_dir.display(), "Planner opened");
        Ok(planner)
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub const fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.config
    }

    #[must_use]
    pub const fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub const fn accounts_mut(&mut self) -> &mut AccountStore {
        &mut self.accounts
    }

    #[must_use]
    pub const fn participants(&self) -> &ParticipantStore {
        &self.participants
    }

    pub const fn participants_mut(&mut self) -> &mut ParticipantStore {
        &mut self.participants
    }

    #[must_use]
    pub const fn shopping(&self) -> &ShoppingStore {
        &self.shopping
    }

    pub const fn shopping_mut(&mut self) -> &mut ShoppingStore {
        &mut self.shopping
    }

    #[must_use]
    pub const fn music(&self) -> &MusicStore {
        &self.music
    }

    pub const fn music_mut(&mut self) -> &mut MusicStore {
        &mut self.music
    }

    #[must_use]
    pub const fn titles(&self) -> &OEmbedClient {
        &self.titles
    }

    /// The logged-in account.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Unauthorized` if nobody is logged in.
    pub fn require_account(&self) -> Result<Account> {
        self.accounts
            .current()?
            .ok_or_else(|| PlannerError::Unauthorized("log in first".to_owned()))
    }

    /// Queue a song on behalf of `account`, looking up its title.
    ///
    /// # Errors
    ///
    /// See [`MusicStore::add_song`].
    pub async fn add_song(
        &mut self,
        url: &str,
        account: &Account,
    ) -> std::result::Result<Song, MusicError> {
        self.music
            .add_song(&self.titles, url, &account.name, &account.id)
            .await
    }

    /// Dashboard counters with the guest list of `event`.
    #[must_use]
    pub fn dashboard(&self, event: EventMode) -> Dashboard {
        Dashboard::collect(&self.accounts, &self.participants, &self.shopping, event)
    }
}
