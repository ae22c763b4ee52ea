//! Exercise log filtering.
//!
//! A [`LogFilter`] selects a user's exercises by inclusive date range and
//! optionally truncates the result. Stores that can push the filter down
//! (SQL) use the bounds directly; in-memory stores call [`LogFilter::apply`].

use crate::types::{DateError, ExerciseDate};

/// Date range and limit applied to an exercise log query.
///
/// Both bounds are inclusive. A `from` later than `to` matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Exclude exercises dated before this day.
    pub from: Option<ExerciseDate>,
    /// Exclude exercises dated after this day.
    pub to: Option<ExerciseDate>,
    /// Keep at most this many matches. Never zero.
    limit: Option<usize>,
}

impl LogFilter {
    /// Build a filter from raw query-string values.
    ///
    /// Blank `from`/`to` are treated as absent. `limit` only applies when it
    /// is a positive integer; anything else (absent, `0`, negative,
    /// non-numeric) means no truncation.
    ///
    /// # Errors
    ///
    /// Returns [`DateError`] if a non-blank `from` or `to` is not a date.
    ///
    /// # Examples
    ///
    /// ```
    /// use exercise_tracker_core::LogFilter;
    ///
    /// let filter = LogFilter::from_query(Some("2024-01-01"), None, Some("2")).unwrap();
    /// assert_eq!(filter.limit(), Some(2));
    ///
    /// let unlimited = LogFilter::from_query(None, None, Some("abc")).unwrap();
    /// assert_eq!(unlimited.limit(), None);
    /// ```
    pub fn from_query(
        from: Option<&str>,
        to: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, DateError> {
        Ok(Self {
            from: ExerciseDate::parse_optional(from)?,
            to: ExerciseDate::parse_optional(to)?,
            limit: parse_limit(limit),
        })
    }

    /// Filter with explicit bounds and limit. A zero limit means no limit.
    #[must_use]
    pub fn new(from: Option<ExerciseDate>, to: Option<ExerciseDate>, limit: Option<usize>) -> Self {
        Self {
            from,
            to,
            limit: limit.filter(|&n| n > 0),
        }
    }

    /// Maximum number of entries to return, if truncating.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Whether an exercise on `date` falls inside the range.
    #[must_use]
    pub fn matches(&self, date: ExerciseDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Apply the range and limit to items already in store order.
    pub fn apply<T, F>(&self, items: impl IntoIterator<Item = T>, date_of: F) -> Vec<T>
    where
        F: Fn(&T) -> ExerciseDate,
    {
        let matching = items.into_iter().filter(|item| self.matches(date_of(item)));
        match self.limit {
            Some(n) => matching.take(n).collect(),
            None => matching.collect(),
        }
    }
}

/// Parse a `limit` query value; only positive integers count.
fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}
