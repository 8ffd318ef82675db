//! SubmitApplicationHandler - intake of a training application.

use std::sync::Arc;

use crate::domain::foundation::{ContactInfo, DomainError, EnrollmentId};
use crate::domain::training::{Enrollment, TrainingError};
use crate::ports::{
    EnrollmentRepository, NotificationLog, NotificationOutcome, NotificationRecord, RelatedEntity,
};

/// Command to submit a training application.
#[derive(Debug, Clone)]
pub struct SubmitApplicationCommand {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience_level: Option<String>,
    pub has_own_camera: bool,
    pub learning_goals: Option<String>,
    pub preferred_intake: Option<String>,
}

/// Handler for application intake.
pub struct SubmitApplicationHandler {
    enrollments: Arc<dyn EnrollmentRepository>,
    notifications: Arc<dyn NotificationLog>,
}

impl SubmitApplicationHandler {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            enrollments,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitApplicationCommand,
    ) -> Result<Enrollment, TrainingError> {
        let contact =
            ContactInfo::new(cmd.name, cmd.email, cmd.phone).map_err(DomainError::from)?;
        let enrollment = Enrollment::new(EnrollmentId::new(), contact)
            .with_experience_level(cmd.experience_level)
            .with_own_camera(cmd.has_own_camera)
            .with_learning_goals(cmd.learning_goals)
            .with_preferred_intake(cmd.preferred_intake);

        self.enrollments.save(&enrollment).await?;

        let record = NotificationRecord::new(
            enrollment.contact().email(),
            "We received your application",
            "application_received",
            RelatedEntity::Enrollment(*enrollment.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, enrollment_id = %enrollment.id(), "failed to record notification");
        }

        Ok(enrollment)
    }
}
