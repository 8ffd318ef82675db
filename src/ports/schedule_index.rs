//! Read-side schedule index for conflict detection.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{BookingId, DomainError};

/// Lightweight projection of a booking for overlap checks.
///
/// The detector only needs identity, the requested time (if any) and the
/// current status; loading full aggregates for a day's schedule would be
/// wasted work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledBooking {
    pub id: BookingId,
    pub time: Option<NaiveTime>,
    pub status: BookingStatus,
}

/// Read port over the booking schedule, keyed by event date.
#[async_trait]
pub trait ScheduleIndex: Send + Sync {
    /// List every booking holding the given date whose status still commits
    /// it to the schedule (pending or confirmed). Cancelled and completed
    /// bookings never appear here.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on read failure
    async fn list_committed(&self, date: NaiveDate) -> Result<Vec<ScheduledBooking>, DomainError>;
}
