//! Calendar date of a logged exercise.
//!
//! Exercises are dated by calendar day, not by instant. Input accepts an ISO
//! date (`2024-01-31`), an ISO date-time with or without an offset (the date
//! part as written is kept), or the rendered form `Mon Jan 01 2024`, so a date
//! from a response can be sent back as input. Output for API responses uses
//! the rendered form.

use core::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format used when rendering dates in API responses.
pub const DISPLAY_FORMAT: &str = "%a %b %d %Y";

const ISO_FORMAT: &str = "%Y-%m-%d";

const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Errors that can occur when parsing an [`ExerciseDate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The input is not a recognised date.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Invalid(String),
}

/// A calendar date an exercise was performed on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ExerciseDate(NaiveDate);

impl ExerciseDate {
    /// Parse a date from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Invalid`] if the trimmed input matches none of the
    /// accepted forms.
    ///
    /// # Examples
    ///
    /// ```
    /// use exercise_tracker_core::ExerciseDate;
    ///
    /// let date = ExerciseDate::parse("2024-01-01").unwrap();
    /// assert_eq!(date.to_date_string(), "Mon Jan 01 2024");
    ///
    /// let stamped = ExerciseDate::parse("2024-01-01T23:30:00Z").unwrap();
    /// assert_eq!(stamped, date);
    ///
    /// let rendered = ExerciseDate::parse("Mon Jan 01 2024").unwrap();
    /// assert_eq!(rendered, date);
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let trimmed = s.trim();

        NaiveDate::parse_from_str(trimmed, ISO_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(trimmed, LOCAL_DATE_TIME_FORMAT).map(|dt| dt.date())
            })
            .or_else(|_| NaiveDate::parse_from_str(trimmed, DISPLAY_FORMAT))
            .map(Self)
            .map_err(|_| DateError::Invalid(trimmed.to_owned()))
    }

    /// Parse optional input, treating missing or blank text as "no date".
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Invalid`] if non-blank input fails to parse.
    pub fn parse_optional(s: Option<&str>) -> Result<Option<Self>, DateError> {
        match s.map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => Self::parse(text).map(Some),
        }
    }

    /// Today's date in UTC.
    #[must_use]
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Wrap a `NaiveDate`.
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The underlying `NaiveDate`.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Human-readable rendering, e.g. `Mon Jan 01 2024`.
    #[must_use]
    pub fn to_date_string(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl From<NaiveDate> for ExerciseDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ExerciseDate {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <NaiveDate as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <NaiveDate as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ExerciseDate {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let date = <NaiveDate as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(date))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ExerciseDate {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <NaiveDate as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
