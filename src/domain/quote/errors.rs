//! Quote-specific error types.

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, QuoteId, StaffId};

/// Quote-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Quote request was not found.
    NotFound(QuoteId),
    /// Attempted state change is not permitted from the current state.
    InvalidTransition(String),
    /// No quoted amount was supplied for sending.
    MissingAmount,
    /// The quote's validity window has closed.
    Expired(QuoteId),
    /// A committed overlapping booking exists for the event slot.
    SchedulingConflict { conflicting: Vec<BookingId> },
    /// Staff member cannot be assigned to this quote.
    IneligibleAssignee { staff_id: StaffId, reason: String },
    /// Staff member does not exist in the directory.
    StaffNotFound(StaffId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl QuoteError {
    pub fn not_found(id: QuoteId) -> Self {
        QuoteError::NotFound(id)
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        QuoteError::InvalidTransition(message.into())
    }

    pub fn scheduling_conflict(conflicting: Vec<BookingId>) -> Self {
        QuoteError::SchedulingConflict { conflicting }
    }

    pub fn ineligible_assignee(staff_id: StaffId, reason: impl Into<String>) -> Self {
        QuoteError::IneligibleAssignee {
            staff_id,
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        QuoteError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        QuoteError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            QuoteError::NotFound(_) => ErrorCode::QuoteNotFound,
            QuoteError::InvalidTransition(_) => ErrorCode::InvalidTransition,
            QuoteError::MissingAmount => ErrorCode::MissingAmount,
            QuoteError::Expired(_) => ErrorCode::QuoteExpired,
            QuoteError::SchedulingConflict { .. } => ErrorCode::SchedulingConflict,
            QuoteError::IneligibleAssignee { .. } => ErrorCode::IneligibleAssignee,
            QuoteError::StaffNotFound(_) => ErrorCode::StaffNotFound,
            QuoteError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            QuoteError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            QuoteError::NotFound(id) => format!("Quote not found: {}", id),
            QuoteError::InvalidTransition(msg) => format!("Invalid transition: {}", msg),
            QuoteError::MissingAmount => "A quoted amount is required before sending".to_string(),
            QuoteError::Expired(id) => format!("Quote {} has expired", id),
            QuoteError::SchedulingConflict { conflicting } => format!(
                "Event slot conflicts with {} confirmed booking(s)",
                conflicting.len()
            ),
            QuoteError::IneligibleAssignee { staff_id, reason } => {
                format!("Staff {} cannot take this quote: {}", staff_id, reason)
            }
            QuoteError::StaffNotFound(id) => format!("Staff not found: {}", id),
            QuoteError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            QuoteError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for QuoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for QuoteError {}

impl From<DomainError> for QuoteError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidTransition => QuoteError::InvalidTransition(err.message),
            ErrorCode::MissingAmount => QuoteError::MissingAmount,
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                QuoteError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => QuoteError::Infrastructure(err.to_string()),
        }
    }
}
