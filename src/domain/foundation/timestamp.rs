//! Timestamp value object.
//!
//! All timestamps are stored without a time zone and interpreted uniformly as
//! the studio's single configured zone. Clock reads go through this type so
//! the rest of the domain never touches `chrono` clocks directly.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable zone-naive point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Creates a timestamp for the current moment on the service clock.
    pub fn now() -> Self {
        Self(Utc::now().naive_utc())
    }

    /// Returns the current date on the service clock.
    pub fn today() -> NaiveDate {
        Self::now().date()
    }

    /// Creates a timestamp from a naive datetime.
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self(dt)
    }

    /// Returns the inner naive datetime.
    pub fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }

    /// Returns the calendar date component.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp offset by the given number of days.
    ///
    /// Negative values subtract days.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + chrono::Duration::days(days))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
