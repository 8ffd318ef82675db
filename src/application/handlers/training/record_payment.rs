//! RecordPaymentHandler - registration fee bookkeeping.

use std::sync::Arc;

use crate::domain::foundation::EnrollmentId;
use crate::domain::training::{Enrollment, TrainingError};
use crate::ports::{
    EnrollmentRepository, NotificationLog, NotificationOutcome, NotificationRecord, RelatedEntity,
};

/// Command to record a registration fee payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub enrollment_id: EnrollmentId,
    pub payment_reference: Option<String>,
}

/// Handler for payment bookkeeping.
///
/// Payment never advances the enrollment lifecycle; it only marks the fee
/// as settled against whatever state the record is in.
pub struct RecordPaymentHandler {
    enrollments: Arc<dyn EnrollmentRepository>,
    notifications: Arc<dyn NotificationLog>,
}

impl RecordPaymentHandler {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            enrollments,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: RecordPaymentCommand) -> Result<Enrollment, TrainingError> {
        let mut enrollment = self
            .enrollments
            .find_by_id(&cmd.enrollment_id)
            .await?
            .ok_or_else(|| TrainingError::enrollment_not_found(cmd.enrollment_id))?;

        let expected = enrollment.status();
        enrollment.record_payment(cmd.payment_reference);

        let committed = self
            .enrollments
            .update_if_status(&enrollment, expected)
            .await?;
        if !committed {
            let current = self
                .enrollments
                .find_by_id(&cmd.enrollment_id)
                .await?
                .ok_or_else(|| TrainingError::enrollment_not_found(cmd.enrollment_id))?;
            return Err(TrainingError::invalid_transition(format!(
                "Enrollment was concurrently moved to {:?}",
                current.status()
            )));
        }

        let record = NotificationRecord::new(
            enrollment.contact().email(),
            "We received your registration fee",
            "payment_received",
            RelatedEntity::Enrollment(*enrollment.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, enrollment_id = %enrollment.id(), "failed to record notification");
        }

        Ok(enrollment)
    }
}
