//! Core types for Revelion.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod guests;
pub mod id;
pub mod status;
pub mod video;

pub use guests::{GuestsShape, LegacyGuests, normalize_guests};
pub use id::*;
pub use status::*;
pub use video::{VideoId, VideoIdError};
