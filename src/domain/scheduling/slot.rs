//! Fixed-duration slot arithmetic.
//!
//! A timed booking is assumed to occupy a fixed-duration slot starting at its
//! time. Overlap is computed on half-open intervals, so back-to-back slots do
//! not conflict.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Default slot length when not configured: two hours.
pub const DEFAULT_SLOT_MINUTES: i64 = 120;

/// Length of the interval a timed booking occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotDuration(i64);

impl SlotDuration {
    /// Creates a slot duration.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `minutes` is not between 1 and 24 hours
    pub fn from_minutes(minutes: i64) -> Result<Self, ValidationError> {
        if !(1..=24 * 60).contains(&minutes) {
            return Err(ValidationError::out_of_range(
                "slot_duration_minutes",
                1,
                24 * 60,
                minutes,
            ));
        }
        Ok(Self(minutes))
    }

    /// Returns the duration in minutes.
    pub fn minutes(&self) -> i64 {
        self.0
    }

    fn seconds(&self) -> i64 {
        self.0 * 60
    }
}

impl Default for SlotDuration {
    fn default() -> Self {
        Self(DEFAULT_SLOT_MINUTES)
    }
}

/// Returns true if two same-day slots of the given duration overlap.
///
/// Half-open interval test: `start1 < end2 && start2 < end1`. Slots running
/// past midnight are compared on the same calendar day, matching the
/// whole-day scope of a schedule lookup.
pub fn slots_overlap(a: NaiveTime, b: NaiveTime, slot: SlotDuration) -> bool {
    let a_start = i64::from(a.num_seconds_from_midnight());
    let b_start = i64::from(b.num_seconds_from_midnight());
    let a_end = a_start + slot.seconds();
    let b_end = b_start + slot.seconds();
    a_start < b_end && b_start < a_end
}
