//! Booking aggregate entity.
//!
//! A booking is an advisory hold on the studio schedule until it is
//! confirmed. Conflict detection runs at confirmation time, not at intake.
//!
//! # Invariants
//!
//! - `confirmed_at` is set iff the booking has passed through `Confirmed`
//! - `completed_at` is set only when status is `Completed`
//! - transitions are monotonic except `Cancelled`, reachable from any
//!   non-terminal state

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, ContactInfo, DomainError, ErrorCode, StaffId, StateMachine, Timestamp,
};

use super::BookingStatus;

/// Booking aggregate - a client's hold on a service date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    contact: ContactInfo,
    service_type: String,
    preferred_date: NaiveDate,
    preferred_time: Option<NaiveTime>,
    location: Option<String>,
    budget_range: Option<String>,
    additional_notes: Option<String>,
    status: BookingStatus,
    assigned_to: Option<StaffId>,
    cancellation_reason: Option<String>,
    cancelled_at: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
    confirmed_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
}

impl Booking {
    /// Creates a new pending booking.
    ///
    /// Does not run conflict detection; a pending booking is an advisory
    /// hold until confirmed.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `service_type` is blank
    /// - `ValidationFailed` if `preferred_date` is in the past
    pub fn new(
        id: BookingId,
        contact: ContactInfo,
        service_type: String,
        preferred_date: NaiveDate,
        preferred_time: Option<NaiveTime>,
    ) -> Result<Self, DomainError> {
        let service_type = service_type.trim().to_string();
        if service_type.is_empty() {
            return Err(DomainError::validation(
                "service_type",
                "Service type cannot be empty",
            ));
        }
        if preferred_date < Timestamp::today() {
            return Err(DomainError::validation(
                "preferred_date",
                "Booking date cannot be in the past",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            contact,
            service_type,
            preferred_date,
            preferred_time,
            location: None,
            budget_range: None,
            additional_notes: None,
            status: BookingStatus::Pending,
            assigned_to: None,
            cancellation_reason: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
            confirmed_at: None,
            completed_at: None,
        })
    }

    /// Reconstitutes a booking from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: BookingId,
        contact: ContactInfo,
        service_type: String,
        preferred_date: NaiveDate,
        preferred_time: Option<NaiveTime>,
        location: Option<String>,
        budget_range: Option<String>,
        additional_notes: Option<String>,
        status: BookingStatus,
        assigned_to: Option<StaffId>,
        cancellation_reason: Option<String>,
        cancelled_at: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
        confirmed_at: Option<Timestamp>,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            contact,
            service_type,
            preferred_date,
            preferred_time,
            location,
            budget_range,
            additional_notes,
            status,
            assigned_to,
            cancellation_reason,
            cancelled_at,
            created_at,
            updated_at,
            confirmed_at,
            completed_at,
        }
    }

    /// Sets the event location at intake.
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    /// Sets the client's budget range at intake.
    pub fn with_budget_range(mut self, budget_range: Option<String>) -> Self {
        self.budget_range = budget_range;
        self
    }

    /// Sets free-form notes at intake.
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.additional_notes = notes;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    pub fn preferred_date(&self) -> NaiveDate {
        self.preferred_date
    }

    pub fn preferred_time(&self) -> Option<NaiveTime> {
        self.preferred_time
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn budget_range(&self) -> Option<&str> {
        self.budget_range.as_deref()
    }

    pub fn additional_notes(&self) -> Option<&str> {
        self.additional_notes.as_deref()
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn assigned_to(&self) -> Option<&StaffId> {
        self.assigned_to.as_ref()
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    pub fn cancelled_at(&self) -> Option<&Timestamp> {
        self.cancelled_at.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn confirmed_at(&self) -> Option<&Timestamp> {
        self.confirmed_at.as_ref()
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Confirms a pending booking.
    ///
    /// The caller must have already run conflict detection; confirmation
    /// itself only enforces the state machine.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless status is `Pending`
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(BookingStatus::Confirmed)
            .map_err(|_| self.invalid_transition("confirm"))?;
        let now = Timestamp::now();
        self.confirmed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Cancels a pending or confirmed booking.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` from `Completed` or `Cancelled`
    pub fn cancel(&mut self, reason: Option<String>) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(BookingStatus::Cancelled)
            .map_err(|_| self.invalid_transition("cancel"))?;
        let now = Timestamp::now();
        self.cancellation_reason = reason;
        self.cancelled_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Completes a confirmed booking whose date has arrived.
    ///
    /// The state machine is checked before the date guard, so a booking
    /// that was never confirmed reports the transition error.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless status is `Confirmed`
    /// - `ValidationFailed` if `preferred_date` is still in the future
    pub fn complete(&mut self) -> Result<(), DomainError> {
        let next = self
            .status
            .transition_to(BookingStatus::Completed)
            .map_err(|_| self.invalid_transition("complete"))?;
        if self.preferred_date > Timestamp::today() {
            return Err(DomainError::validation(
                "preferred_date",
                "Cannot complete a booking before its service date",
            ));
        }
        self.status = next;
        let now = Timestamp::now();
        self.completed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Records the staff member responsible for this booking.
    ///
    /// Role eligibility is validated by the assignment resolver before this
    /// is called.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the booking is already terminal
    pub fn assign(&mut self, staff_id: StaffId) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(self.invalid_transition("assign"));
        }
        self.assigned_to = Some(staff_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn invalid_transition(&self, attempted: &str) -> DomainError {
        DomainError::new(
            ErrorCode::InvalidTransition,
            format!("Cannot {} a booking in state {:?}", attempted, self.status),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_contact() -> ContactInfo {
        ContactInfo::new("Amina Odhiambo", "amina@example.com", "+254700000001").unwrap()
    }

    fn future_date() -> NaiveDate {
        Timestamp::today() + chrono::Duration::days(30)
    }

    fn test_booking() -> Booking {
        Booking::new(
            BookingId::new(),
            test_contact(),
            "Wedding Photography".to_string(),
            future_date(),
            NaiveTime::from_hms_opt(14, 0, 0),
        )
        .unwrap()
    }

    fn past_date_confirmed_booking() -> Booking {
        let mut booking = test_booking();
        booking.confirm().unwrap();
        booking.preferred_date = Timestamp::today() - chrono::Duration::days(1);
        booking
    }

    // Construction

    #[test]
    fn new_booking_is_pending() {
        let booking = test_booking();
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert!(booking.confirmed_at().is_none());
        assert!(booking.completed_at().is_none());
    }

    #[test]
    fn new_booking_rejects_blank_service_type() {
        let result = Booking::new(
            BookingId::new(),
            test_contact(),
            "   ".to_string(),
            future_date(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_booking_rejects_past_date() {
        let result = Booking::new(
            BookingId::new(),
            test_contact(),
            "Portrait Session".to_string(),
            Timestamp::today() - chrono::Duration::days(1),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_booking_allows_unscheduled_time() {
        let booking = Booking::new(
            BookingId::new(),
            test_contact(),
            "Event Videography".to_string(),
            future_date(),
            None,
        )
        .unwrap();
        assert!(booking.preferred_time().is_none());
    }

    // Confirm

    #[test]
    fn confirm_sets_confirmed_at() {
        let mut booking = test_booking();
        booking.confirm().unwrap();
        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert!(booking.confirmed_at().is_some());
    }

    #[test]
    fn confirm_twice_fails() {
        let mut booking = test_booking();
        booking.confirm().unwrap();
        let result = booking.confirm();
        assert!(matches!(result, Err(e) if e.code == ErrorCode::InvalidTransition));
    }

    // Cancel

    #[test]
    fn cancel_from_pending_records_reason() {
        let mut booking = test_booking();
        booking.cancel(Some("client request".to_string())).unwrap();
        assert_eq!(booking.status(), BookingStatus::Cancelled);
        assert_eq!(booking.cancellation_reason(), Some("client request"));
        assert!(booking.cancelled_at().is_some());
    }

    #[test]
    fn cancel_from_confirmed_is_allowed() {
        let mut booking = test_booking();
        booking.confirm().unwrap();
        assert!(booking.cancel(None).is_ok());
        // Passed through Confirmed, so confirmed_at stays set.
        assert!(booking.confirmed_at().is_some());
    }

    #[test]
    fn cancel_after_completion_fails() {
        let mut booking = past_date_confirmed_booking();
        booking.complete().unwrap();
        assert!(booking.cancel(None).is_err());
    }

    #[test]
    fn cancel_twice_fails() {
        let mut booking = test_booking();
        booking.cancel(None).unwrap();
        assert!(booking.cancel(None).is_err());
    }

    // Complete

    #[test]
    fn complete_unconfirmed_booking_reports_transition_error() {
        // Still Pending and still in the future: the state machine answers
        // before the date guard does.
        let mut booking = test_booking();
        let err = booking.complete().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    #[test]
    fn complete_sets_completed_at() {
        let mut booking = past_date_confirmed_booking();
        booking.complete().unwrap();
        assert_eq!(booking.status(), BookingStatus::Completed);
        let completed_at = booking.completed_at().unwrap();
        assert!(booking.preferred_date() <= completed_at.date());
    }

    #[test]
    fn complete_fails_before_service_date() {
        let mut booking = test_booking();
        booking.confirm().unwrap();
        let result = booking.complete();
        assert!(matches!(result, Err(e) if e.code == ErrorCode::ValidationFailed));
        assert_eq!(booking.status(), BookingStatus::Confirmed);
    }

    #[test]
    fn complete_from_pending_fails() {
        let mut booking = test_booking();
        booking.preferred_date = Timestamp::today();
        assert!(booking.complete().is_err());
    }

    // Assign

    #[test]
    fn assign_records_staff_member() {
        let mut booking = test_booking();
        let staff = StaffId::new();
        booking.assign(staff).unwrap();
        assert_eq!(booking.assigned_to(), Some(&staff));
    }

    #[test]
    fn assign_to_cancelled_booking_fails() {
        let mut booking = test_booking();
        booking.cancel(None).unwrap();
        assert!(booking.assign(StaffId::new()).is_err());
    }
}
