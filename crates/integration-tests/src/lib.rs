//! Integration tests for the Revelion planner.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p revelion-integration-tests
//!
//! # Include tests that call the live oEmbed endpoint
//! cargo test -p revelion-integration-tests -- --ignored
//! ```
//!
//! Every [`TestContext`] owns a temporary directory with the durable data
//! and one subdirectory per session, so reopening a planner behaves like a
//! process restart and a second session behaves like a second device.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use revelion_core::VideoId;
use revelion_planner::Planner;
use revelion_planner::db::FileStorage;
use revelion_planner::services::{OEmbedClient, TitleError, TitleLookup};
use revelion_planner::session::Session;
use serde_json::Value;
use tempfile::TempDir;

/// Endpoint nothing listens on; lookups fail fast.
pub const UNREACHABLE_OEMBED: &str = "http://127.0.0.1:9/oembed";

/// Temporary planner installation.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    #[must_use]
    pub fn session_dir(&self, name: &str) -> PathBuf {
        self.dir.path().join("sessions").join(name)
    }

    /// Open a planner in the default session.
    ///
    /// # Panics
    ///
    /// Panics if the planner cannot be opened.
    #[must_use]
    pub fn planner(&self) -> Planner {
        self.planner_in("default")
    }

    /// Open a planner in the named session.
    ///
    /// # Panics
    ///
    /// Panics if the planner cannot be opened.
    #[must_use]
    pub fn planner_in(&self, session: &str) -> Planner {
        let storage = FileStorage::open(self.data_dir()).expect("Failed to open data dir");
        let session_storage =
            FileStorage::open(self.session_dir(session)).expect("Failed to open session dir");
        let titles = OEmbedClient::new(UNREACHABLE_OEMBED, Duration::from_secs(60));

        Planner::open(
            Arc::new(storage),
            Session::new(Arc::new(session_storage)),
            titles,
        )
        .expect("Failed to open planner")
    }

    /// Parse the stored JSON under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the file is missing or not JSON.
    #[must_use]
    pub fn read_raw(&self, key: &str) -> Value {
        let path = self.data_dir().join(format!("{key}.json"));
        let raw = std::fs::read_to_string(&path).expect("Failed to read stored value");
        serde_json::from_str(&raw).expect("Stored value is not JSON")
    }

    /// Overwrite the stored JSON under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_raw(&self, key: &str, raw: &str) {
        std::fs::create_dir_all(self.data_dir()).expect("Failed to create data dir");
        std::fs::write(self.data_dir().join(format!("{key}.json")), raw)
            .expect("Failed to write stored value");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Title lookup that always answers with the same title.
pub struct FixedTitle(pub &'static str);

impl TitleLookup for FixedTitle {
    async fn fetch_title(&self, _video_id: &VideoId) -> Result<String, TitleError> {
        Ok(self.0.to_owned())
    }
}
