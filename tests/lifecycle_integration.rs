//! Integration tests for the studio's lifecycle flows.
//!
//! These tests verify the end-to-end wiring across handlers:
//! 1. A quote request moves pending -> sent -> accepted and produces a
//!    pending booking holding the event slot
//! 2. Booking confirmation is gated by the conflict detector over the same
//!    schedule the quote flow writes to
//! 3. A training application moves pending -> accepted -> enrolled, and the
//!    cohort seat counter refuses to overfill
//!
//! Uses in-memory implementations to test the flows without a database.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use studio_ops::application::handlers::booking::{ConfirmBookingCommand, ConfirmBookingHandler};
use studio_ops::application::handlers::quote::{
    AcceptQuoteCommand, AcceptQuoteHandler, CreateQuoteCommand, CreateQuoteHandler,
    SendQuoteCommand, SendQuoteHandler,
};
use studio_ops::application::handlers::training::{
    CreateCohortCommand, CreateCohortHandler, EnrollStudentCommand, EnrollStudentHandler,
    ReviewApplicationCommand, ReviewApplicationHandler, ReviewDecision,
    SubmitApplicationCommand, SubmitApplicationHandler,
};
use studio_ops::domain::booking::{Booking, BookingStatus};
use studio_ops::domain::foundation::{
    BookingId, CohortId, DomainError, EnrollmentId, ErrorCode, QuoteId, StaffId, Timestamp,
};
use studio_ops::domain::quote::{QuoteError, QuoteRequest, QuoteStatus};
use studio_ops::domain::scheduling::{ConflictDetector, SlotDuration};
use studio_ops::domain::training::{Cohort, Enrollment, EnrollmentStatus, TrainingError};
use studio_ops::ports::{
    BookingRepository, CohortRepository, EnrollmentRepository, NotificationLog,
    NotificationRecord, QuoteRepository, ScheduleIndex, ScheduledBooking, SeatCommit,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// In-memory booking store doubling as the schedule index.
#[derive(Default)]
struct BookingStore {
    bookings: Mutex<HashMap<BookingId, Booking>>,
}

impl BookingStore {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn get(&self, id: &BookingId) -> Option<Booking> {
        self.bookings.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl BookingRepository for BookingStore {
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
        let stored = bookings.get_mut(booking.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id()),
            )
        })?;
        if stored.status() != expected {
            return Ok(false);
        }
        *stored = booking.clone();
        Ok(true)
    }
}

#[async_trait]
impl ScheduleIndex for BookingStore {
    async fn list_committed(&self, date: NaiveDate) -> Result<Vec<ScheduledBooking>, DomainError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.preferred_date() == date)
            .filter(|b| {
                matches!(b.status(), BookingStatus::Pending | BookingStatus::Confirmed)
            })
            .map(|b| ScheduledBooking {
                id: *b.id(),
                time: b.preferred_time(),
                status: b.status(),
            })
            .collect())
    }
}

#[derive(Default)]
struct QuoteStore {
    quotes: Mutex<HashMap<QuoteId, QuoteRequest>>,
}

impl QuoteStore {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl QuoteRepository for QuoteStore {
    async fn save(&self, quote: &QuoteRequest) -> Result<(), DomainError> {
        self.quotes.lock().unwrap().insert(*quote.id(), quote.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<QuoteRequest>, DomainError> {
        Ok(self.quotes.lock().unwrap().get(id).cloned())
    }

    async fn update_if_status(
        &self,
        quote: &QuoteRequest,
        expected: QuoteStatus,
    ) -> Result<bool, DomainError> {
        let mut quotes = self.quotes.lock().unwrap();
        let stored = quotes.get_mut(quote.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::QuoteNotFound,
                format!("Quote not found: {}", quote.id()),
            )
        })?;
        if stored.status() != expected {
            return Ok(false);
        }
        *stored = quote.clone();
        Ok(true)
    }
}

/// In-memory training store keeping enrollments and cohorts behind one lock
/// so the seat commits stay atomic, as the SQL transaction does.
#[derive(Default)]
struct TrainingStore {
    state: Mutex<(HashMap<EnrollmentId, Enrollment>, HashMap<CohortId, Cohort>)>,
}

impl TrainingStore {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn cohort(&self, id: &CohortId) -> Option<Cohort> {
        self.state.lock().unwrap().1.get(id).cloned()
    }
}

#[async_trait]
impl EnrollmentRepository for TrainingStore {
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        self.state
            .lock()
            .unwrap()
            .0
            .insert(*enrollment.id(), enrollment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError> {
        Ok(self.state.lock().unwrap().0.get(id).cloned())
    }

    async fn update_if_status(
        &self,
        enrollment: &Enrollment,
        expected: EnrollmentStatus,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.lock().unwrap();
        let stored = state.0.get_mut(enrollment.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::EnrollmentNotFound,
                format!("Enrollment not found: {}", enrollment.id()),
            )
        })?;
        if stored.status() != expected {
            return Ok(false);
        }
        *stored = enrollment.clone();
        Ok(true)
    }

    async fn commit_enrollment(
        &self,
        enrollment: &Enrollment,
        cohort: &CohortId,
        expected: EnrollmentStatus,
    ) -> Result<SeatCommit, DomainError> {
        let mut state = self.state.lock().unwrap();
        let (enrollments, cohorts) = &mut *state;
        let stored_cohort = cohorts.get_mut(cohort).ok_or_else(|| {
            DomainError::new(ErrorCode::CohortNotFound, format!("Cohort not found: {}", cohort))
        })?;
        let stored = enrollments.get_mut(enrollment.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::EnrollmentNotFound,
                format!("Enrollment not found: {}", enrollment.id()),
            )
        })?;
        if stored.status() != expected {
            return Ok(SeatCommit::StateChanged);
        }
        if stored_cohort.consume_seat().is_err() {
            return Ok(SeatCommit::CohortFull);
        }
        *stored = enrollment.clone();
        Ok(SeatCommit::Committed)
    }

    async fn commit_withdrawal(
        &self,
        enrollment: &Enrollment,
        cohort: &CohortId,
        expected: EnrollmentStatus,
    ) -> Result<SeatCommit, DomainError> {
        let mut state = self.state.lock().unwrap();
        let (enrollments, cohorts) = &mut *state;
        let stored_cohort = cohorts.get_mut(cohort).ok_or_else(|| {
            DomainError::new(ErrorCode::CohortNotFound, format!("Cohort not found: {}", cohort))
        })?;
        let stored = enrollments.get_mut(enrollment.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::EnrollmentNotFound,
                format!("Enrollment not found: {}", enrollment.id()),
            )
        })?;
        if stored.status() != expected {
            return Ok(SeatCommit::StateChanged);
        }
        stored_cohort.release_seat()?;
        *stored = enrollment.clone();
        Ok(SeatCommit::Committed)
    }
}

#[async_trait]
impl CohortRepository for TrainingStore {
    async fn save(&self, cohort: &Cohort) -> Result<(), DomainError> {
        self.state
            .lock()
            .unwrap()
            .1
            .insert(*cohort.id(), cohort.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CohortId) -> Result<Option<Cohort>, DomainError> {
        Ok(self.cohort(id))
    }

    async fn update_details(&self, cohort: &Cohort) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let stored = state.1.get_mut(cohort.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::CohortNotFound,
                format!("Cohort not found: {}", cohort.id()),
            )
        })?;
        let seats = stored.current_enrollment();
        *stored = Cohort::reconstitute(
            *cohort.id(),
            cohort.name().to_string(),
            cohort.start_date(),
            cohort.end_date(),
            cohort.max_students(),
            seats,
            cohort.is_cancelled(),
            *cohort.created_at(),
            *cohort.updated_at(),
        );
        Ok(())
    }
}

#[derive(Default)]
struct LogStore {
    records: Mutex<Vec<NotificationRecord>>,
}

impl LogStore {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn templates(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.template.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationLog for LogStore {
    async fn record(&self, record: &NotificationRecord) -> Result<(), DomainError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn event_date() -> NaiveDate {
    Timestamp::today() + chrono::Duration::days(45)
}

fn quote_command(time: (u32, u32)) -> CreateQuoteCommand {
    CreateQuoteCommand {
        name: "Brian Mwangi".to_string(),
        email: "brian@example.com".to_string(),
        phone: "+254711000002".to_string(),
        company_name: Some("Mwangi Events Ltd".to_string()),
        selected_services: vec!["Wedding Photography".to_string()],
        event_date: Some(event_date()),
        event_time: NaiveTime::from_hms_opt(time.0, time.1, 0),
        event_location: Some("Naivasha".to_string()),
        project_description: None,
    }
}

fn application_command(name: &str, email: &str) -> SubmitApplicationCommand {
    SubmitApplicationCommand {
        name: name.to_string(),
        email: email.to_string(),
        phone: "+254722000003".to_string(),
        experience_level: Some("beginner".to_string()),
        has_own_camera: true,
        learning_goals: None,
        preferred_intake: None,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn quote_lifecycle_produces_a_confirmable_booking() {
    let quotes = QuoteStore::new();
    let bookings = BookingStore::new();
    let log = LogStore::new();
    let detector = Arc::new(ConflictDetector::new(bookings.clone(), SlotDuration::default()));

    let create = CreateQuoteHandler::new(quotes.clone(), detector.clone(), log.clone());
    let send = SendQuoteHandler::new(quotes.clone(), detector.clone(), log.clone(), 30);
    let accept =
        AcceptQuoteHandler::new(quotes.clone(), bookings.clone(), detector.clone(), log.clone());
    let confirm = ConfirmBookingHandler::new(bookings.clone(), detector.clone(), log.clone());

    let quote = create.handle(quote_command((14, 0))).await.unwrap();
    assert_eq!(quote.status(), QuoteStatus::Pending);
    assert!(!quote.conflict_check().unwrap().has_conflict);

    let sent = send
        .handle(SendQuoteCommand {
            quote_id: *quote.id(),
            amount_cents: Some(450_000_00),
            valid_until: None,
        })
        .await
        .unwrap();
    assert_eq!(sent.status(), QuoteStatus::Sent);
    assert_eq!(sent.valid_until(), Some(Timestamp::today() + chrono::Duration::days(30)));

    let accepted = accept
        .handle(AcceptQuoteCommand { quote_id: *quote.id() })
        .await
        .unwrap();
    let booking = accepted.booking.unwrap();
    assert_eq!(booking.status(), BookingStatus::Pending);
    assert_eq!(booking.preferred_date(), event_date());

    let confirmed = confirm
        .handle(ConfirmBookingCommand { booking_id: *booking.id() })
        .await
        .unwrap();
    assert_eq!(confirmed.status(), BookingStatus::Confirmed);
    assert_eq!(bookings.get(booking.id()).unwrap().status(), BookingStatus::Confirmed);

    assert_eq!(
        log.templates(),
        vec![
            "quote_request_received",
            "quote_sent",
            "quote_accepted",
            "booking_confirmed"
        ]
    );
}

#[tokio::test]
async fn accepted_slot_blocks_a_rival_quote() {
    let quotes = QuoteStore::new();
    let bookings = BookingStore::new();
    let log = LogStore::new();
    let detector = Arc::new(ConflictDetector::new(bookings.clone(), SlotDuration::default()));

    let create = CreateQuoteHandler::new(quotes.clone(), detector.clone(), log.clone());
    let send = SendQuoteHandler::new(quotes.clone(), detector.clone(), log.clone(), 30);
    let accept =
        AcceptQuoteHandler::new(quotes.clone(), bookings.clone(), detector.clone(), log.clone());

    // First client accepts the 14:00 slot. The resulting booking is still
    // pending, but the hold already counts.
    let first = create.handle(quote_command((14, 0))).await.unwrap();
    send.handle(SendQuoteCommand {
        quote_id: *first.id(),
        amount_cents: Some(450_000_00),
        valid_until: None,
    })
    .await
    .unwrap();
    let booking = accept
        .handle(AcceptQuoteCommand { quote_id: *first.id() })
        .await
        .unwrap()
        .booking
        .unwrap();
    assert_eq!(booking.status(), BookingStatus::Pending);

    // Second client asks for 15:00 the same day; two-hour slots overlap.
    // Intake still succeeds, with the conflict recorded for staff.
    let second = create.handle(quote_command((15, 0))).await.unwrap();
    assert!(second.conflict_check().unwrap().has_conflict);

    send.handle(SendQuoteCommand {
        quote_id: *second.id(),
        amount_cents: Some(380_000_00),
        valid_until: None,
    })
    .await
    .unwrap();

    // Acceptance is where the slot is contested.
    let result = accept
        .handle(AcceptQuoteCommand { quote_id: *second.id() })
        .await;
    match result {
        Err(QuoteError::SchedulingConflict { conflicting }) => {
            assert_eq!(conflicting, vec![*booking.id()]);
        }
        other => panic!("expected scheduling conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn training_flow_enrolls_until_the_cohort_is_full() {
    let store = TrainingStore::new();
    let log = LogStore::new();

    let create_cohort = CreateCohortHandler::new(store.clone());
    let submit = SubmitApplicationHandler::new(store.clone(), log.clone());
    let review = ReviewApplicationHandler::new(store.clone(), log.clone());
    let enroll = EnrollStudentHandler::new(store.clone(), store.clone(), log.clone());

    let cohort = create_cohort
        .handle(CreateCohortCommand {
            name: "September Intake".to_string(),
            start_date: Timestamp::today() + chrono::Duration::days(14),
            end_date: Timestamp::today() + chrono::Duration::days(90),
            max_students: 1,
        })
        .await
        .unwrap();

    let reviewer = StaffId::new();
    let mut enrollment_ids = Vec::new();
    for (name, email) in [
        ("Wanjiru Kamau", "wanjiru@example.com"),
        ("Otieno Okoth", "otieno@example.com"),
    ] {
        let application = submit.handle(application_command(name, email)).await.unwrap();
        review
            .handle(ReviewApplicationCommand {
                enrollment_id: *application.id(),
                decision: ReviewDecision::Accept,
                reviewer,
            })
            .await
            .unwrap();
        enrollment_ids.push(*application.id());
    }

    // One seat: the first enrollment lands, the second is turned away.
    let first = enroll
        .handle(EnrollStudentCommand {
            enrollment_id: enrollment_ids[0],
            cohort_id: *cohort.id(),
        })
        .await
        .unwrap();
    assert_eq!(first.status(), EnrollmentStatus::Enrolled);

    let second = enroll
        .handle(EnrollStudentCommand {
            enrollment_id: enrollment_ids[1],
            cohort_id: *cohort.id(),
        })
        .await;
    assert!(matches!(second, Err(TrainingError::CohortFull(_))));

    let stored = store.cohort(cohort.id()).unwrap();
    assert_eq!(stored.current_enrollment(), 1);

    // The turned-away student keeps their accepted application intact.
    let rejected = EnrollmentRepository::find_by_id(&*store, &enrollment_ids[1])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rejected.status(), EnrollmentStatus::Accepted);
    assert!(rejected.cohort_id().is_none());
}
