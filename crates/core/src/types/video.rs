//! Video identifiers extracted from shared links.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches the id segment after the last recognised link marker
/// (`youtu.be/`, `v/`, `u/x/`, `embed/`, `watch?v=`, `&v=`).
static VIDEO_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").expect("Invalid regex")
});

/// Errors that can occur when parsing a [`VideoId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoIdError {
    /// The identifier has the wrong length.
    #[error("video id must be exactly {expected} characters (got {actual})")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Length of the input.
        actual: usize,
    },
}

/// A video identifier, always exactly 11 characters.
///
/// ## Examples
///
/// ```
/// use revelion_core::VideoId;
///
/// let short = VideoId::extract("https://youtu.be/abc12345678");
/// let watch = VideoId::extract("https://www.youtube.com/watch?v=abc12345678");
/// assert_eq!(short, watch);
///
/// assert!(VideoId::extract("https://youtu.be/abc1234567").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Required identifier length.
    pub const LENGTH: usize = 11;

    /// Parse a bare identifier.
    ///
    /// # Errors
    ///
    /// Returns [`VideoIdError::WrongLength`] unless the input is exactly
    /// [`Self::LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, VideoIdError> {
        let actual = s.chars().count();
        if actual != Self::LENGTH {
            return Err(VideoIdError::WrongLength {
                expected: Self::LENGTH,
                actual,
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Extract the identifier from a watch, short, embed or playlist link.
    ///
    /// Returns `None` when no identifier is present or it is not exactly
    /// [`Self::LENGTH`] characters.
    #[must_use]
    pub fn extract(url: &str) -> Option<Self> {
        let captures = VIDEO_LINK_RE.captures(url)?;
        let candidate = captures.get(2)?.as_str();
        Self::parse(candidate).ok()
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this identifier.
    #[must_use]
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
