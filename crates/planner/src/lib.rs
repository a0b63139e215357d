//! Revelion Planner library.
//!
//! Domain stores for a recurring party (Christmas / New Year): the shared
//! configuration, accounts, RSVPs, the shopping list and the music queue.
//!
//! # Architecture
//!
//! Every store owns one collection in memory and mirrors it to durable
//! [`db::Storage`] under its own versioned key. Mutations validate and merge in
//! memory, write the whole collection through, and only then replace the
//! in-memory copy. Session-scoped values (active account, dashboard unlock)
//! live in a separate [`session::Session`].
//!
//! [`state::Planner`] owns one instance of each store and is the entry point
//! for front ends.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod stores;

pub use error::{PlannerError, Result};
pub use state::Planner;
