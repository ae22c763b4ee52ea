//! Domain models for the exercise tracker.
//!
//! These are validated domain objects, separate from the database row types
//! in [`crate::db`] and the JSON response shapes in [`crate::routes`].

pub mod exercise;
pub mod user;

pub use exercise::{Exercise, NewExercise};
pub use user::User;
