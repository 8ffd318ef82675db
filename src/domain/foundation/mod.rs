//! Foundation - shared value objects and error types.

mod contact;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use contact::ContactInfo;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BookingId, CohortId, EnrollmentId, QuoteId, StaffId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
