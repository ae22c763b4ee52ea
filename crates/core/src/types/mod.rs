//! Core types for the exercise tracker.
//!
//! This module provides type-safe wrappers for the domain concepts that cross
//! the HTTP and storage boundaries.

pub mod date;
pub mod description;
pub mod duration;
pub mod id;
pub mod username;

pub use date::{DateError, ExerciseDate};
pub use description::{Description, DescriptionError};
pub use duration::{DurationError, ExerciseDuration};
pub use id::*;
pub use username::{Username, UsernameError};
