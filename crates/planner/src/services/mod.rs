//! Services built on top of the stores.
//!
//! # Services
//!
//! - `title` - Song title lookup over oEmbed, with a cache
//! - `dashboard` - Aggregate counts for the admin dashboard

pub mod dashboard;
pub mod title;

pub use dashboard::{Dashboard, EventSummary};
pub use title::{OEmbedClient, PLACEHOLDER_TITLE, TitleError, TitleLookup};
