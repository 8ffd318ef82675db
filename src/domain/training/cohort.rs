//! Cohort aggregate entity.
//!
//! # Invariants
//!
//! - `start_date < end_date`
//! - `max_students > 0`
//! - `0 <= current_enrollment <= max_students` at all times, including
//!   transiently; the seat counter only moves together with the owning
//!   enrollment's status (see the enrollment repository port)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CohortId, DomainError, ErrorCode, Timestamp, ValidationError};

use super::CohortStatus;

/// A scheduled intake of the training programme with bounded capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    id: CohortId,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    max_students: u32,
    current_enrollment: u32,
    cancelled: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Cohort {
    /// Creates a new cohort.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    /// - `ValidationFailed` if the date range is inverted
    /// - `OutOfRange` if `max_students` is zero
    pub fn new(
        id: CohortId,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        max_students: u32,
    ) -> Result<Self, DomainError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if start_date >= end_date {
            return Err(DomainError::validation(
                "start_date",
                "Cohort start date must be before its end date",
            ));
        }
        if max_students == 0 {
            return Err(ValidationError::out_of_range("max_students", 1, i64::MAX, 0).into());
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            start_date,
            end_date,
            max_students,
            current_enrollment: 0,
            cancelled: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a cohort from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CohortId,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        max_students: u32,
        current_enrollment: u32,
        cancelled: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            start_date,
            end_date,
            max_students,
            current_enrollment,
            cancelled,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &CohortId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn max_students(&self) -> u32 {
        self.max_students
    }

    pub fn current_enrollment(&self) -> u32 {
        self.current_enrollment
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Status on the given date; cancellation is sticky.
    pub fn status_on(&self, today: NaiveDate) -> CohortStatus {
        if self.cancelled {
            CohortStatus::Cancelled
        } else if today < self.start_date {
            CohortStatus::Upcoming
        } else if today <= self.end_date {
            CohortStatus::Active
        } else {
            CohortStatus::Completed
        }
    }

    /// Status on the service clock's current date.
    pub fn status(&self) -> CohortStatus {
        self.status_on(Timestamp::today())
    }

    /// Returns true if at least one seat is free.
    pub fn has_capacity(&self) -> bool {
        self.current_enrollment < self.max_students
    }

    /// Returns true if new students may still be enrolled.
    pub fn is_open_for_enrollment(&self) -> bool {
        matches!(self.status(), CohortStatus::Upcoming | CohortStatus::Active)
    }

    /// Cancels the cohort.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.updated_at = Timestamp::now();
    }

    /// Consumes one seat.
    ///
    /// Mirrors the single-row compare-and-update the persistence layer
    /// performs; the in-memory path must uphold the same bound.
    ///
    /// # Errors
    ///
    /// - `CohortFull` when every seat is taken
    pub fn consume_seat(&mut self) -> Result<(), DomainError> {
        if !self.has_capacity() {
            return Err(DomainError::new(
                ErrorCode::CohortFull,
                format!("Cohort '{}' is at capacity ({})", self.name, self.max_students),
            ));
        }
        self.current_enrollment += 1;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Releases one seat after a withdrawal.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the counter would go negative
    pub fn release_seat(&mut self) -> Result<(), DomainError> {
        if self.current_enrollment == 0 {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Cohort '{}' has no seats to release", self.name),
            ));
        }
        self.current_enrollment -= 1;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
