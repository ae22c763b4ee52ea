//! Business logic services for the exercise tracker.
//!
//! # Services
//!
//! - `tracker` - User registration, exercise logging and log queries

pub mod tracker;

pub use tracker::{ExerciseInput, TrackerError, TrackerService};
