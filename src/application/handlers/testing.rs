//! Shared in-memory port doubles for handler tests.
//!
//! Each double holds its state behind a single mutex, so compare-and-set
//! semantics hold under concurrent handler calls in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    BookingId, CohortId, DomainError, EnrollmentId, ErrorCode, QuoteId, StaffId,
};
use crate::domain::quote::{QuoteRequest, QuoteStatus};
use crate::domain::staff::StaffProfile;
use crate::domain::training::{Cohort, Enrollment, EnrollmentStatus};
use crate::ports::{
    BookingRepository, CohortRepository, EnrollmentRepository, NotificationLog,
    NotificationRecord, QuoteRepository, ScheduleIndex, ScheduledBooking, SeatCommit,
    StaffDirectory,
};

// ─────────────────────────────────────────────────────────────────────────────
// Bookings
// ─────────────────────────────────────────────────────────────────────────────

/// Booking store doubling as the schedule index, like the real adapter.
pub(crate) struct InMemoryBookings {
    bookings: Mutex<HashMap<BookingId, Booking>>,
}

impl InMemoryBookings {
    pub(crate) fn empty() -> Arc<Self> {
        Self::with(Vec::new())
    }

    pub(crate) fn with(bookings: Vec<Booking>) -> Arc<Self> {
        Arc::new(Self {
            bookings: Mutex::new(bookings.into_iter().map(|b| (*b.id(), b)).collect()),
        })
    }

    pub(crate) fn get(&self, id: &BookingId) -> Option<Booking> {
        self.bookings.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        self.bookings
            .lock()
            .unwrap()
            .insert(*booking.id(), booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.get(id))
    }

    async fn update_if_status(
        &self,
        booking: &Booking,
        expected: BookingStatus,
    ) -> Result<bool, DomainError> {
        let mut bookings = self.bookings.lock().unwrap();
        let current = bookings.get(booking.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::BookingNotFound, "Booking not found")
        })?;
        if current.status() != expected {
            return Ok(false);
        }
        bookings.insert(*booking.id(), booking.clone());
        Ok(true)
    }
}

#[async_trait]
impl ScheduleIndex for InMemoryBookings {
    async fn list_committed(&self, date: NaiveDate) -> Result<Vec<ScheduledBooking>, DomainError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.preferred_date() == date && b.status().is_committed())
            .map(|b| ScheduledBooking {
                id: *b.id(),
                time: b.preferred_time(),
                status: b.status(),
            })
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Quotes
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) struct InMemoryQuotes {
    quotes: Mutex<HashMap<QuoteId, QuoteRequest>>,
}

impl InMemoryQuotes {
    pub(crate) fn empty() -> Arc<Self> {
        Self::with(Vec::new())
    }

    pub(crate) fn with(quotes: Vec<QuoteRequest>) -> Arc<Self> {
        Arc::new(Self {
            quotes: Mutex::new(quotes.into_iter().map(|q| (*q.id(), q)).collect()),
        })
    }

    pub(crate) fn get(&self, id: &QuoteId) -> Option<QuoteRequest> {
        self.quotes.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuotes {
    async fn save(&self, quote: &QuoteRequest) -> Result<(), DomainError> {
        self.quotes.lock().unwrap().insert(*quote.id(), quote.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<QuoteRequest>, DomainError> {
        Ok(self.get(id))
    }

    async fn update_if_status(
        &self,
        quote: &QuoteRequest,
        expected: QuoteStatus,
    ) -> Result<bool, DomainError> {
        let mut quotes = self.quotes.lock().unwrap();
        let current = quotes
            .get(quote.id())
            .ok_or_else(|| DomainError::new(ErrorCode::QuoteNotFound, "Quote not found"))?;
        if current.status() != expected {
            return Ok(false);
        }
        quotes.insert(*quote.id(), quote.clone());
        Ok(true)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Enrollments and cohorts
// ─────────────────────────────────────────────────────────────────────────────

/// Enrollment store sharing a lock with its cohorts, mirroring the
/// transactional seat commits of the real adapter.
pub(crate) struct InMemoryTraining {
    state: Mutex<TrainingState>,
}

struct TrainingState {
    enrollments: HashMap<EnrollmentId, Enrollment>,
    cohorts: HashMap<CohortId, Cohort>,
}

impl InMemoryTraining {
    pub(crate) fn empty() -> Arc<Self> {
        Self::with(Vec::new(), Vec::new())
    }

    pub(crate) fn with(enrollments: Vec<Enrollment>, cohorts: Vec<Cohort>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(TrainingState {
                enrollments: enrollments.into_iter().map(|e| (*e.id(), e)).collect(),
                cohorts: cohorts.into_iter().map(|c| (*c.id(), c)).collect(),
            }),
        })
    }

    pub(crate) fn enrollment(&self, id: &EnrollmentId) -> Option<Enrollment> {
        self.state.lock().unwrap().enrollments.get(id).cloned()
    }

    pub(crate) fn cohort(&self, id: &CohortId) -> Option<Cohort> {
        self.state.lock().unwrap().cohorts.get(id).cloned()
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryTraining {
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        self.state
            .lock()
            .unwrap()
            .enrollments
            .insert(*enrollment.id(), enrollment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError> {
        Ok(self.enrollment(id))
    }

    async fn update_if_status(
        &self,
        enrollment: &Enrollment,
        expected: EnrollmentStatus,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.lock().unwrap();
        let current = state.enrollments.get(enrollment.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::EnrollmentNotFound, "Enrollment not found")
        })?;
        if current.status() != expected {
            return Ok(false);
        }
        state
            .enrollments
            .insert(*enrollment.id(), enrollment.clone());
        Ok(true)
    }

    async fn commit_enrollment(
        &self,
        enrollment: &Enrollment,
        cohort: &CohortId,
        expected: EnrollmentStatus,
    ) -> Result<SeatCommit, DomainError> {
        let mut state = self.state.lock().unwrap();
        let current = state.enrollments.get(enrollment.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::EnrollmentNotFound, "Enrollment not found")
        })?;
        if current.status() != expected {
            return Ok(SeatCommit::StateChanged);
        }
        let cohort_row = state
            .cohorts
            .get_mut(cohort)
            .ok_or_else(|| DomainError::new(ErrorCode::CohortNotFound, "Cohort not found"))?;
        if cohort_row.consume_seat().is_err() {
            return Ok(SeatCommit::CohortFull);
        }
        state
            .enrollments
            .insert(*enrollment.id(), enrollment.clone());
        Ok(SeatCommit::Committed)
    }

    async fn commit_withdrawal(
        &self,
        enrollment: &Enrollment,
        cohort: &CohortId,
        expected: EnrollmentStatus,
    ) -> Result<SeatCommit, DomainError> {
        let mut state = self.state.lock().unwrap();
        let current = state.enrollments.get(enrollment.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::EnrollmentNotFound, "Enrollment not found")
        })?;
        if current.status() != expected {
            return Ok(SeatCommit::StateChanged);
        }
        let cohort_row = state
            .cohorts
            .get_mut(cohort)
            .ok_or_else(|| DomainError::new(ErrorCode::CohortNotFound, "Cohort not found"))?;
        cohort_row.release_seat()?;
        state
            .enrollments
            .insert(*enrollment.id(), enrollment.clone());
        Ok(SeatCommit::Committed)
    }
}

#[async_trait]
impl CohortRepository for InMemoryTraining {
    async fn save(&self, cohort: &Cohort) -> Result<(), DomainError> {
        self.state
            .lock()
            .unwrap()
            .cohorts
            .insert(*cohort.id(), cohort.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CohortId) -> Result<Option<Cohort>, DomainError> {
        Ok(self.cohort(id))
    }

    async fn update_details(&self, cohort: &Cohort) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if !state.cohorts.contains_key(cohort.id()) {
            return Err(DomainError::new(ErrorCode::CohortNotFound, "Cohort not found"));
        }
        state.cohorts.insert(*cohort.id(), cohort.clone());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Staff directory
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) struct StaffDirectoryStub {
    profiles: Mutex<HashMap<StaffId, StaffProfile>>,
}

impl StaffDirectoryStub {
    pub(crate) fn with(profiles: Vec<StaffProfile>) -> Arc<Self> {
        Arc::new(Self {
            profiles: Mutex::new(profiles.into_iter().map(|p| (p.id, p)).collect()),
        })
    }
}

#[async_trait]
impl StaffDirectory for StaffDirectoryStub {
    async fn get(&self, id: &StaffId) -> Result<Option<StaffProfile>, DomainError> {
        Ok(self.profiles.lock().unwrap().get(id).cloned())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Notification log
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) struct RecordingLog {
    records: Mutex<Vec<NotificationRecord>>,
    fail: bool,
}

impl RecordingLog {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub(crate) fn records(&self) -> Vec<NotificationRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationLog for RecordingLog {
    async fn record(&self, record: &NotificationRecord) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated log failure",
            ));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
