//! Exercise Tracker Core - Shared types library.
//!
//! This crate provides the domain types used by every exercise tracker
//! component:
//! - `server` - REST API for users, exercises and logs
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. Validation of raw request input into domain values lives
//! here so every store and handler agrees on the same rules.
//!
//! # Modules
//!
//! - [`types`] - Opaque IDs and validated newtypes for usernames, descriptions,
//!   durations and dates
//! - [`log`] - Date-range and limit filtering for exercise logs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod log;
pub mod types;

pub use log::LogFilter;
pub use types::*;
