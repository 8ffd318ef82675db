//! CompleteTrainingHandler - closes out a student's programme.

use std::sync::Arc;

use crate::domain::foundation::EnrollmentId;
use crate::domain::training::{Enrollment, EnrollmentStatus, TrainingError};
use crate::ports::{
    EnrollmentRepository, NotificationLog, NotificationOutcome, NotificationRecord, RelatedEntity,
};

/// Command to mark an enrolled student as having completed training.
#[derive(Debug, Clone)]
pub struct CompleteTrainingCommand {
    pub enrollment_id: EnrollmentId,
}

/// Handler for training completion.
///
/// Completion keeps the student's seat counted; only withdrawal frees one.
pub struct CompleteTrainingHandler {
    enrollments: Arc<dyn EnrollmentRepository>,
    notifications: Arc<dyn NotificationLog>,
}

impl CompleteTrainingHandler {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            enrollments,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: CompleteTrainingCommand) -> Result<Enrollment, TrainingError> {
        let mut enrollment = self
            .enrollments
            .find_by_id(&cmd.enrollment_id)
            .await?
            .ok_or_else(|| TrainingError::enrollment_not_found(cmd.enrollment_id))?;

        enrollment.complete_training()?;

        let committed = self
            .enrollments
            .update_if_status(&enrollment, EnrollmentStatus::Enrolled)
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
            "Congratulations on completing the programme",
            "training_completed",
            RelatedEntity::Enrollment(*enrollment.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, enrollment_id = %enrollment.id(), "failed to record notification");
        }

        Ok(enrollment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{InMemoryTraining, RecordingLog};
    use crate::domain::foundation::{CohortId, ContactInfo, StaffId};

    fn enrolled_student() -> Enrollment {
        let mut enrollment = Enrollment::new(
            EnrollmentId::new(),
            ContactInfo::new("Wanjiru Kamau", "wanjiru@example.com", "+254722000003").unwrap(),
        );
        enrollment.accept_application(StaffId::new()).unwrap();
        enrollment.enroll(CohortId::new()).unwrap();
        enrollment
    }

    #[tokio::test]
    async fn completes_enrolled_student() {
        let student = enrolled_student();
        let id = *student.id();
        let store = InMemoryTraining::with(vec![student], vec![]);
        let log = RecordingLog::new();
        let handler = CompleteTrainingHandler::new(store.clone(), log.clone());

        let completed = handler
            .handle(CompleteTrainingCommand { enrollment_id: id })
            .await
            .unwrap();

        assert_eq!(completed.status(), EnrollmentStatus::Completed);
        assert!(completed.consumes_seat());
        assert_eq!(log.records()[0].template, "training_completed");
    }

    #[tokio::test]
    async fn accepted_student_cannot_complete() {
        let mut student = Enrollment::new(
            EnrollmentId::new(),
            ContactInfo::new("Wanjiru Kamau", "wanjiru@example.com", "+254722000003").unwrap(),
        );
        student.accept_application(StaffId::new()).unwrap();
        let id = *student.id();
        let store = InMemoryTraining::with(vec![student], vec![]);
        let handler = CompleteTrainingHandler::new(store, RecordingLog::new());

        let result = handler
            .handle(CompleteTrainingCommand { enrollment_id: id })
            .await;
        assert!(matches!(result, Err(TrainingError::InvalidTransition(_))));
    }
}
