//! Planner configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `REVELION_DATA_DIR` - Directory for durable collections (default: ./data)
//! - `REVELION_SESSION_DIR` - Directory for session values (default: `<data>/session`)
//! - `REVELION_OEMBED_URL` - Title lookup endpoint (default: YouTube oEmbed)
//! - `REVELION_TITLE_CACHE_TTL_SECS` - Title cache lifetime (default: 3600)

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::services::title::DEFAULT_OEMBED_URL;

static DEFAULT_OEMBED: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_OEMBED_URL).expect("Invalid default oEmbed URL"));

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Planner configuration.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Directory holding one JSON file per collection
    pub data_dir: PathBuf,
    /// Directory holding session-scoped values
    pub session_dir: PathBuf,
    /// oEmbed endpoint for song titles
    pub oembed_url: Url,
    /// How long looked-up titles stay cached
    pub title_cache_ttl: Duration,
}

impl PlannerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("REVELION_DATA_DIR", DEFAULT_DATA_DIR));
        let session_dir = get_optional_env("REVELION_SESSION_DIR")
            .map_or_else(|| data_dir.join("session"), PathBuf::from);

        let oembed_url = parse_url(
            "REVELION_OEMBED_URL",
            &get_env_or_default("REVELION_OEMBED_URL", DEFAULT_OEMBED_URL),
        )?;

        let title_cache_ttl = get_optional_env("REVELION_TITLE_CACHE_TTL_SECS")
            .map(|value| parse_secs("REVELION_TITLE_CACHE_TTL_SECS", &value))
            .transpose()?
            .unwrap_or(Duration::from_secs(DEFAULT_CACHE_TTL_SECS));

        Ok(Self {
            data_dir,
            session_dir,
            oembed_url,
            title_cache_ttl,
        })
    }

    /// Configuration rooted at `data_dir` with default values elsewhere.
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            session_dir: data_dir.join("session"),
            data_dir,
            oembed_url: DEFAULT_OEMBED.clone(),
            title_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
