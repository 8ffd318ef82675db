//! Training-specific error types.

use crate::domain::foundation::{CohortId, DomainError, EnrollmentId, ErrorCode};

/// Enrollment and cohort errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingError {
    /// Enrollment was not found.
    EnrollmentNotFound(EnrollmentId),
    /// Cohort was not found.
    CohortNotFound(CohortId),
    /// Every seat in the cohort is taken.
    CohortFull(CohortId),
    /// Cohort is cancelled or already finished.
    CohortClosed(CohortId),
    /// Attempted state change is not permitted from the current state.
    InvalidTransition(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl TrainingError {
    pub fn enrollment_not_found(id: EnrollmentId) -> Self {
        TrainingError::EnrollmentNotFound(id)
    }

    pub fn cohort_not_found(id: CohortId) -> Self {
        TrainingError::CohortNotFound(id)
    }

    pub fn cohort_full(id: CohortId) -> Self {
        TrainingError::CohortFull(id)
    }

    pub fn cohort_closed(id: CohortId) -> Self {
        TrainingError::CohortClosed(id)
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        TrainingError::InvalidTransition(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TrainingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        TrainingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TrainingError::EnrollmentNotFound(_) => ErrorCode::EnrollmentNotFound,
            TrainingError::CohortNotFound(_) => ErrorCode::CohortNotFound,
            TrainingError::CohortFull(_) => ErrorCode::CohortFull,
            TrainingError::CohortClosed(_) => ErrorCode::InvalidTransition,
            TrainingError::InvalidTransition(_) => ErrorCode::InvalidTransition,
            TrainingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            TrainingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TrainingError::EnrollmentNotFound(id) => format!("Enrollment not found: {}", id),
            TrainingError::CohortNotFound(id) => format!("Cohort not found: {}", id),
            TrainingError::CohortFull(id) => format!("Cohort {} is at capacity", id),
            TrainingError::CohortClosed(id) => {
                format!("Cohort {} is not open for enrollment", id)
            }
            TrainingError::InvalidTransition(msg) => format!("Invalid transition: {}", msg),
            TrainingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            TrainingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for TrainingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TrainingError {}

impl From<DomainError> for TrainingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidTransition => TrainingError::InvalidTransition(err.message),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                TrainingError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => TrainingError::Infrastructure(err.to_string()),
        }
    }
}
