//! Conflict detection over the booking schedule.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::foundation::{BookingId, DomainError};
use crate::ports::ScheduleIndex;

use super::{slots_overlap, SlotDuration};

/// Result of a conflict check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    pub conflicting_booking_ids: Vec<BookingId>,
}

impl ConflictReport {
    pub fn has_conflict(&self) -> bool {
        !self.conflicting_booking_ids.is_empty()
    }

    fn clear() -> Self {
        Self {
            conflicting_booking_ids: Vec::new(),
        }
    }
}

/// Detects scheduling conflicts for a candidate date and time.
///
/// Every committed booking on the day holds its slot: pending and confirmed
/// alike. A booking without a time holds its whole day; two untimed holds on
/// the same day conflict, as does an untimed hold against any timed slot.
/// The detector never writes anything.
pub struct ConflictDetector {
    schedule: Arc<dyn ScheduleIndex>,
    slot: SlotDuration,
}

impl ConflictDetector {
    pub fn new(schedule: Arc<dyn ScheduleIndex>, slot: SlotDuration) -> Self {
        Self { schedule, slot }
    }

    /// Checks the candidate slot against the day's committed holds.
    ///
    /// `exclude` drops the entity being re-checked from its own results,
    /// so a booking never conflicts with itself.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the schedule cannot be read
    pub async fn check(
        &self,
        date: NaiveDate,
        time: Option<NaiveTime>,
        exclude: Option<&BookingId>,
    ) -> Result<ConflictReport, DomainError> {
        let day = self.schedule.list_committed(date).await?;

        let mut report = ConflictReport::clear();
        for scheduled in day {
            if Some(&scheduled.id) == exclude {
                continue;
            }
            let overlaps = match (time, scheduled.time) {
                (Some(candidate), Some(existing)) => {
                    slots_overlap(candidate, existing, self.slot)
                }
                // An untimed booking holds the whole day.
                _ => true,
            };
            if overlaps {
                report.conflicting_booking_ids.push(scheduled.id);
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingStatus;
    use crate::ports::ScheduledBooking;
    use async_trait::async_trait;

    struct FixedSchedule {
        bookings: Vec<ScheduledBooking>,
    }

    #[async_trait]
    impl ScheduleIndex for FixedSchedule {
        async fn list_committed(
            &self,
            _date: NaiveDate,
        ) -> Result<Vec<ScheduledBooking>, DomainError> {
            Ok(self.bookings.clone())
        }
    }

    fn detector(bookings: Vec<ScheduledBooking>) -> ConflictDetector {
        ConflictDetector::new(Arc::new(FixedSchedule { bookings }), SlotDuration::default())
    }

    fn scheduled(time: Option<(u32, u32)>, status: BookingStatus) -> ScheduledBooking {
        ScheduledBooking {
            id: BookingId::new(),
            time: time.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap()),
            status,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 12).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn empty_day_has_no_conflict() {
        let detector = detector(vec![]);
        let report = detector.check(day(), Some(t(14, 0)), None).await.unwrap();
        assert!(!report.has_conflict());
    }

    #[tokio::test]
    async fn overlapping_slots_conflict() {
        // 14:00 and 15:00 overlap under two-hour slots.
        let existing = scheduled(Some((14, 0)), BookingStatus::Confirmed);
        let existing_id = existing.id;
        let detector = detector(vec![existing]);

        let report = detector.check(day(), Some(t(15, 0)), None).await.unwrap();
        assert!(report.has_conflict());
        assert_eq!(report.conflicting_booking_ids, vec![existing_id]);
    }

    #[tokio::test]
    async fn back_to_back_slots_do_not_conflict() {
        let detector = detector(vec![scheduled(Some((14, 0)), BookingStatus::Confirmed)]);

        let report = detector.check(day(), Some(t(16, 0)), None).await.unwrap();
        assert!(!report.has_conflict());
    }

    #[tokio::test]
    async fn untimed_booking_holds_the_whole_day() {
        let detector = detector(vec![scheduled(None, BookingStatus::Pending)]);

        let report = detector.check(day(), Some(t(9, 0)), None).await.unwrap();
        assert!(report.has_conflict());
    }

    #[tokio::test]
    async fn untimed_candidate_conflicts_with_any_timed_slot() {
        let detector = detector(vec![scheduled(Some((18, 0)), BookingStatus::Confirmed)]);

        let report = detector.check(day(), None, None).await.unwrap();
        assert!(report.has_conflict());
    }

    #[tokio::test]
    async fn pending_hold_blocks_like_a_confirmed_one() {
        let pending = scheduled(Some((14, 0)), BookingStatus::Pending);
        let confirmed = scheduled(Some((14, 30)), BookingStatus::Confirmed);
        let ids = vec![pending.id, confirmed.id];
        let detector = detector(vec![pending, confirmed]);

        let report = detector.check(day(), Some(t(14, 0)), None).await.unwrap();
        assert_eq!(report.conflicting_booking_ids, ids);
    }

    #[tokio::test]
    async fn excluded_booking_never_conflicts_with_itself() {
        let own = scheduled(Some((14, 0)), BookingStatus::Pending);
        let own_id = own.id;
        let detector = detector(vec![own]);

        let report = detector
            .check(day(), Some(t(14, 0)), Some(&own_id))
            .await
            .unwrap();
        assert!(!report.has_conflict());
    }

    #[tokio::test]
    async fn multiple_overlaps_all_reported() {
        let a = scheduled(Some((13, 0)), BookingStatus::Pending);
        let b = scheduled(Some((15, 0)), BookingStatus::Confirmed);
        let ids = vec![a.id, b.id];
        let detector = detector(vec![a, b]);

        let report = detector.check(day(), Some(t(14, 0)), None).await.unwrap();
        assert_eq!(report.conflicting_booking_ids, ids);
    }
}
