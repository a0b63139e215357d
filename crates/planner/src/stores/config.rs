//! Configuration store and dashboard unlock.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use revelion_core::{EventMode, RsvpStatus};

use crate::db::{self, Storage, StorageError, keys};
use crate::models::{AppConfig, ConfigPatch, LocationConfig, LocationPatch, RsvpMessage};
use crate::session::Session;

/// Holds the application configuration.
pub struct ConfigStore {
    storage: Arc<dyn Storage>,
    session: Session,
    config: AppConfig,
}

impl ConfigStore {
    /// Load the stored configuration merged over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if a stored field has the wrong type.
    pub fn open(storage: Arc<dyn Storage>, session: Session) -> Result<Self, StorageError> {
        Self::open_with_defaults(storage, session, AppConfig::default())
    }

    /// Like [`Self::open`] with explicit defaults.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if a stored field has the wrong type.
    pub fn open_with_defaults(
        storage: Arc<dyn Storage>,
        session: Session,
        defaults: AppConfig,
    ) -> Result<Self, StorageError> {
        let config = match db::load::<Value>(storage.as_ref(), keys::CONFIG)? {
            Some(stored) => AppConfig::from_stored(&defaults, stored).map_err(|source| {
                StorageError::Corrupt {
                    key: keys::CONFIG.to_owned(),
                    source,
                }
            })?,
            None => {
                debug!("No stored configuration, using defaults");
                defaults
            }
        };

        Ok(Self {
            storage,
            session,
            config,
        })
    }

    #[must_use]
    pub const fn get(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn active_location(&self) -> &LocationConfig {
        self.config.active_location()
    }

    #[must_use]
    pub const fn rsvp_message(&self, status: RsvpStatus) -> &RsvpMessage {
        self.config.rsvp_messages.get(status)
    }

    /// Replace the top-level fields present in `patch`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the configuration cannot be persisted.
    pub fn update(&mut self, patch: ConfigPatch) -> Result<(), StorageError> {
        let mut next = self.config.clone();
        next.apply(patch);
        self.commit(next)?;
        info!(mode = %self.config.mode, "Configuration updated");
        Ok(())
    }

    /// Merge `patch` into the location of `mode`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the configuration cannot be persisted.
    pub fn update_location(
        &mut self,
        mode: EventMode,
        patch: LocationPatch,
    ) -> Result<(), StorageError> {
        let mut next = self.config.clone();
        patch.apply(next.location_mut(mode));
        self.commit(next)?;
        info!(%mode, "Location updated");
        Ok(())
    }

    /// Unlock the admin dashboard for this session if `password` matches.
    ///
    /// A wrong password has no side effect.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session flag cannot be written.
    pub fn login_admin(&self, password: &str) -> Result<bool, StorageError> {
        if password != self.config.admin_password {
            warn!("Rejected dashboard password");
            return Ok(false);
        }
        self.session.set_admin_unlocked(true)?;
        info!("Dashboard unlocked");
        Ok(true)
    }

    /// Lock the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session flag cannot be removed.
    pub fn logout_admin(&self) -> Result<(), StorageError> {
        self.session.set_admin_unlocked(false)
    }

    /// Whether the dashboard is unlocked in this session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if session storage cannot be read.
    pub fn is_admin_logged_in(&self) -> Result<bool, StorageError> {
        self.session.is_admin_unlocked()
    }

    fn commit(&mut self, next: AppConfig) -> Result<(), StorageError> {
        db::save(self.storage.as_ref(), keys::CONFIG, &next)?;
        self.config = next;
        Ok(())
    }
}
