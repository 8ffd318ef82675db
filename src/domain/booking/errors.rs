//! Booking-specific error types.

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, StaffId};

/// Booking-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Booking was not found.
    NotFound(BookingId),
    /// Attempted state change is not permitted from the current state.
    InvalidTransition(String),
    /// A committed overlapping booking exists.
    SchedulingConflict { conflicting: Vec<BookingId> },
    /// Staff member cannot be assigned to this service.
    IneligibleAssignee { staff_id: StaffId, reason: String },
    /// Staff member does not exist in the directory.
    StaffNotFound(StaffId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl BookingError {
    pub fn not_found(id: BookingId) -> Self {
        BookingError::NotFound(id)
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        BookingError::InvalidTransition(message.into())
    }

    pub fn scheduling_conflict(conflicting: Vec<BookingId>) -> Self {
        BookingError::SchedulingConflict { conflicting }
    }

    pub fn ineligible_assignee(staff_id: StaffId, reason: impl Into<String>) -> Self {
        BookingError::IneligibleAssignee {
            staff_id,
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::InvalidTransition(_) => ErrorCode::InvalidTransition,
            BookingError::SchedulingConflict { .. } => ErrorCode::SchedulingConflict,
            BookingError::IneligibleAssignee { .. } => ErrorCode::IneligibleAssignee,
            BookingError::StaffNotFound(_) => ErrorCode::StaffNotFound,
            BookingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            BookingError::NotFound(id) => format!("Booking not found: {}", id),
            BookingError::InvalidTransition(msg) => format!("Invalid transition: {}", msg),
            BookingError::SchedulingConflict { conflicting } => format!(
                "Scheduling conflict with {} committed booking(s)",
                conflicting.len()
            ),
            BookingError::IneligibleAssignee { staff_id, reason } => {
                format!("Staff {} cannot take this booking: {}", staff_id, reason)
            }
            BookingError::StaffNotFound(id) => format!("Staff not found: {}", id),
            BookingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BookingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidTransition => BookingError::InvalidTransition(err.message),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                BookingError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}
