//! Notification log port.
//!
//! Every lifecycle transition that notifies a customer or staff member
//! leaves a record here, whatever the delivery outcome. The log is
//! append-only; delivery itself is an adapter concern.

use async_trait::async_trait;

use crate::domain::foundation::{
    BookingId, DomainError, EnrollmentId, QuoteId, Timestamp,
};

/// Delivery outcome recorded alongside a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    Failed,
    Pending,
}

impl NotificationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationOutcome::Sent => "SENT",
            NotificationOutcome::Failed => "FAILED",
            NotificationOutcome::Pending => "PENDING",
        }
    }
}

/// The lifecycle entity a notification relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelatedEntity {
    Booking(BookingId),
    Quote(QuoteId),
    Enrollment(EnrollmentId),
}

/// A single notification log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub recipient: String,
    pub subject: String,
    pub template: String,
    pub related: RelatedEntity,
    pub outcome: NotificationOutcome,
    pub recorded_at: Timestamp,
}

impl NotificationRecord {
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        template: impl Into<String>,
        related: RelatedEntity,
        outcome: NotificationOutcome,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            template: template.into(),
            related,
            outcome,
            recorded_at: Timestamp::now(),
        }
    }
}

/// Append-only port for notification records.
#[async_trait]
pub trait NotificationLog: Send + Sync {
    /// Append a record. Failures here must never abort the transition that
    /// produced it; callers log and move on.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn record(&self, record: &NotificationRecord) -> Result<(), DomainError>;
}
