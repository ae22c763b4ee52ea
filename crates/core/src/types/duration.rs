//! Exercise duration type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`ExerciseDuration`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// The input is empty or only whitespace.
    #[error("duration is required")]
    Missing,
    /// The input is not a whole number.
    #[error("duration must be a whole number of minutes, got '{0}'")]
    NotANumber(String),
    /// The input is zero or negative.
    #[error("duration must be positive")]
    NotPositive,
}

/// Length of an exercise in whole minutes.
///
/// Always positive. Parsing is strict: `"30"` is accepted, while `"30min"`,
/// `"1.5"` and `"abc"` are rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ExerciseDuration(i32);

impl ExerciseDuration {
    /// Parse a duration from raw form input.
    ///
    /// # Errors
    ///
    /// Returns [`DurationError::Missing`] for blank input,
    /// [`DurationError::NotANumber`] if the text is not an integer that fits
    /// in an `i32`, and [`DurationError::NotPositive`] for zero or negatives.
    pub fn parse(s: &str) -> Result<Self, DurationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DurationError::Missing);
        }

        let minutes = trimmed
            .parse::<i32>()
            .map_err(|_| DurationError::NotANumber(trimmed.to_owned()))?;

        Self::new(minutes)
    }

    /// Create a duration from a minute count.
    ///
    /// # Errors
    ///
    /// Returns [`DurationError::NotPositive`] if `minutes <= 0`.
    pub const fn new(minutes: i32) -> Result<Self, DurationError> {
        if minutes <= 0 {
            return Err(DurationError::NotPositive);
        }
        Ok(Self(minutes))
    }

    /// Minutes as an integer.
    #[must_use]
    pub const fn minutes(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ExerciseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ExerciseDuration {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ExerciseDuration {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let minutes = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(minutes)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ExerciseDuration {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
