//! Quote request aggregate entity.
//!
//! A quote request tracks a client's inquiry from intake through pricing to
//! acceptance. Conflict state is recorded with every check and recomputed at
//! each gating transition; the stored value is advisory only.
//!
//! # Invariants
//!
//! - `selected_services` is non-empty
//! - conflict flag and check time are set together (see [`ConflictCheck`])
//! - `quoted_amount` is present once the quote has been sent
//! - expired quotes cannot be accepted

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::booking::Booking;
use crate::domain::foundation::{
    BookingId, ContactInfo, DomainError, ErrorCode, QuoteId, StaffId, StateMachine, Timestamp,
};

use super::QuoteStatus;

/// Non-empty set of service references selected by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedServices(Vec<String>);

impl SelectedServices {
    /// Builds a validated service selection.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the list is empty or contains blank entries
    pub fn new(services: Vec<String>) -> Result<Self, DomainError> {
        let services: Vec<String> = services
            .into_iter()
            .map(|s| s.trim().to_string())
            .collect();
        if services.is_empty() {
            return Err(DomainError::validation(
                "selected_services",
                "At least one service must be selected",
            ));
        }
        if services.iter().any(|s| s.is_empty()) {
            return Err(DomainError::validation(
                "selected_services",
                "Service references cannot be blank",
            ));
        }
        Ok(Self(services))
    }

    /// Returns the selected service references.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of selected services.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the selection is non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the selection as a single service-type label.
    pub fn as_service_type(&self) -> String {
        self.0.join(", ")
    }
}

/// Result of the most recent conflict check, flag and time always together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictCheck {
    pub has_conflict: bool,
    pub checked_at: Timestamp,
}

/// Quote request aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    id: QuoteId,
    contact: ContactInfo,
    company_name: Option<String>,
    selected_services: SelectedServices,
    event_date: Option<NaiveDate>,
    event_time: Option<NaiveTime>,
    event_location: Option<String>,
    project_description: Option<String>,
    status: QuoteStatus,
    conflict_check: Option<ConflictCheck>,
    quoted_amount_cents: Option<i64>,
    quote_sent_at: Option<Timestamp>,
    valid_until: Option<NaiveDate>,
    assigned_to: Option<StaffId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl QuoteRequest {
    /// Creates a new pending quote request.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the event date is in the past
    pub fn new(
        id: QuoteId,
        contact: ContactInfo,
        selected_services: SelectedServices,
        event_date: Option<NaiveDate>,
        event_time: Option<NaiveTime>,
    ) -> Result<Self, DomainError> {
        if let Some(date) = event_date {
            if date < Timestamp::today() {
                return Err(DomainError::validation(
                    "event_date",
                    "Event date cannot be in the past",
                ));
            }
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            contact,
            company_name: None,
            selected_services,
            event_date,
            event_time,
            event_location: None,
            project_description: None,
            status: QuoteStatus::Pending,
            conflict_check: None,
            quoted_amount_cents: None,
            quote_sent_at: None,
            valid_until: None,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a quote request from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: QuoteId,
        contact: ContactInfo,
        company_name: Option<String>,
        selected_services: SelectedServices,
        event_date: Option<NaiveDate>,
        event_time: Option<NaiveTime>,
        event_location: Option<String>,
        project_description: Option<String>,
        status: QuoteStatus,
        conflict_check: Option<ConflictCheck>,
        quoted_amount_cents: Option<i64>,
        quote_sent_at: Option<Timestamp>,
        valid_until: Option<NaiveDate>,
        assigned_to: Option<StaffId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            contact,
            company_name,
            selected_services,
            event_date,
            event_time,
            event_location,
            project_description,
            status,
            conflict_check,
            quoted_amount_cents,
            quote_sent_at,
            valid_until,
            assigned_to,
            created_at,
            updated_at,
        }
    }

    /// Sets the client's company name at intake.
    pub fn with_company_name(mut self, company_name: Option<String>) -> Self {
        self.company_name = company_name;
        self
    }

    /// Sets the event location at intake.
    pub fn with_event_location(mut self, location: Option<String>) -> Self {
        self.event_location = location;
        self
    }

    /// Sets the project description at intake.
    pub fn with_project_description(mut self, description: Option<String>) -> Self {
        self.project_description = description;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &QuoteId {
        &self.id
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn selected_services(&self) -> &SelectedServices {
        &self.selected_services
    }

    pub fn event_date(&self) -> Option<NaiveDate> {
        self.event_date
    }

    pub fn event_time(&self) -> Option<NaiveTime> {
        self.event_time
    }

    pub fn event_location(&self) -> Option<&str> {
        self.event_location.as_deref()
    }

    pub fn project_description(&self) -> Option<&str> {
        self.project_description.as_deref()
    }

    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    /// Returns the latest recorded conflict check, if any.
    pub fn conflict_check(&self) -> Option<&ConflictCheck> {
        self.conflict_check.as_ref()
    }

    /// Quoted amount in minor currency units (cents).
    pub fn quoted_amount_cents(&self) -> Option<i64> {
        self.quoted_amount_cents
    }

    pub fn quote_sent_at(&self) -> Option<&Timestamp> {
        self.quote_sent_at.as_ref()
    }

    pub fn valid_until(&self) -> Option<NaiveDate> {
        self.valid_until
    }

    pub fn assigned_to(&self) -> Option<&StaffId> {
        self.assigned_to.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if the validity window has closed.
    pub fn is_expired(&self) -> bool {
        match self.valid_until {
            Some(valid_until) => valid_until < Timestamp::today(),
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records the outcome of a conflict check.
    ///
    /// Flag and check time are written together, keeping them consistent.
    pub fn record_conflict_check(&mut self, has_conflict: bool) {
        let now = Timestamp::now();
        self.conflict_check = Some(ConflictCheck {
            has_conflict,
            checked_at: now,
        });
        self.updated_at = now;
    }

    /// Marks the quote as sent with its price and validity window.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless status is `Pending`
    /// - `ValidationFailed` if the amount is not positive or the validity
    ///   window is already closed
    pub fn send(&mut self, amount_cents: i64, valid_until: NaiveDate) -> Result<(), DomainError> {
        if amount_cents <= 0 {
            return Err(DomainError::validation(
                "quoted_amount",
                "Quoted amount must be positive",
            ));
        }
        if valid_until < Timestamp::today() {
            return Err(DomainError::validation(
                "valid_until",
                "Validity window cannot end in the past",
            ));
        }
        self.status = self
            .status
            .transition_to(QuoteStatus::Sent)
            .map_err(|_| self.invalid_transition("send"))?;
        let now = Timestamp::now();
        self.quoted_amount_cents = Some(amount_cents);
        self.quote_sent_at = Some(now);
        self.valid_until = Some(valid_until);
        self.updated_at = now;
        Ok(())
    }

    /// Accepts a sent, unexpired quote.
    ///
    /// The caller must have run a fresh conflict check against confirmed
    /// bookings before committing this transition.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless status is `Sent`
    /// - `QuoteExpired` if `valid_until` has passed
    pub fn accept(&mut self) -> Result<(), DomainError> {
        if self.status == QuoteStatus::Sent && self.is_expired() {
            return Err(DomainError::new(
                ErrorCode::QuoteExpired,
                format!(
                    "Quote expired on {}",
                    self.valid_until.expect("expired implies valid_until")
                ),
            ));
        }
        self.status = self
            .status
            .transition_to(QuoteStatus::Accepted)
            .map_err(|_| self.invalid_transition("accept"))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Rejects a sent quote.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless status is `Sent`
    pub fn reject(&mut self) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(QuoteStatus::Rejected)
            .map_err(|_| self.invalid_transition("reject"))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancels a quote before a decision is reached.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` from `Accepted` or `Rejected`
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(QuoteStatus::Cancelled)
            .map_err(|_| self.invalid_transition("cancel"))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Records the staff member handling this quote.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the quote is already terminal
    pub fn assign(&mut self, staff_id: StaffId) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(self.invalid_transition("assign"));
        }
        self.assigned_to = Some(staff_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Creates the pending booking produced by accepting this quote.
    ///
    /// This is the only place a quote produces a booking. The booking carries
    /// the quote's event date, time and services.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless status is `Accepted`
    /// - `ValidationFailed` if the quote has no event date
    pub fn to_booking(&self, booking_id: BookingId) -> Result<Booking, DomainError> {
        if self.status != QuoteStatus::Accepted {
            return Err(self.invalid_transition("convert"));
        }
        let event_date = self.event_date.ok_or_else(|| {
            DomainError::validation(
                "event_date",
                "Cannot create a booking from a quote without an event date",
            )
        })?;

        let booking = Booking::new(
            booking_id,
            self.contact.clone(),
            self.selected_services.as_service_type(),
            event_date,
            self.event_time,
        )?;
        Ok(booking.with_location(self.event_location.clone()))
    }

    fn invalid_transition(&self, attempted: &str) -> DomainError {
        DomainError::new(
            ErrorCode::InvalidTransition,
            format!("Cannot {} a quote in state {:?}", attempted, self.status),
        )
    }
}
