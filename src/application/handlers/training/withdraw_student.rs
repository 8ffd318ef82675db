//! WithdrawStudentHandler - releases a seat when a student leaves.

use std::sync::Arc;

use crate::domain::foundation::EnrollmentId;
use crate::domain::training::{Enrollment, TrainingError};
use crate::ports::{
    EnrollmentRepository, NotificationLog, NotificationOutcome, NotificationRecord, RelatedEntity,
    SeatCommit,
};

/// Command to withdraw an enrolled student.
#[derive(Debug, Clone)]
pub struct WithdrawStudentCommand {
    pub enrollment_id: EnrollmentId,
}

/// Handler for student withdrawal.
///
/// The status change and the seat release commit atomically, mirroring
/// enrollment.
pub struct WithdrawStudentHandler {
    enrollments: Arc<dyn EnrollmentRepository>,
    notifications: Arc<dyn NotificationLog>,
}

impl WithdrawStudentHandler {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            enrollments,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: WithdrawStudentCommand) -> Result<Enrollment, TrainingError> {
        let mut enrollment = self
            .enrollments
            .find_by_id(&cmd.enrollment_id)
            .await?
            .ok_or_else(|| TrainingError::enrollment_not_found(cmd.enrollment_id))?;

        let cohort_id = *enrollment.cohort_id().ok_or_else(|| {
            TrainingError::invalid_transition("Enrollment has no cohort to withdraw from")
        })?;

        let expected = enrollment.status();
        enrollment.withdraw()?;

        match self
            .enrollments
            .commit_withdrawal(&enrollment, &cohort_id, expected)
            .await?
        {
            SeatCommit::Committed => {}
            SeatCommit::CohortFull | SeatCommit::StateChanged => {
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
        }

        let record = NotificationRecord::new(
            enrollment.contact().email(),
            "Your withdrawal is confirmed",
            "withdrawal_confirmed",
            RelatedEntity::Enrollment(*enrollment.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, enrollment_id = %enrollment.id(), "failed to record notification");
        }

        Ok(enrollment)
    }
}
