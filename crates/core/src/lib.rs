//! Revelion Core - Shared types library.
//!
//! This crate provides common types used across all Revelion components:
//! - `planner` - Domain stores (config, accounts, RSVPs, shopping, music)
//! - `cli` - Command-line front end over the stores
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, event/status enums, guest lists, and video ids

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
