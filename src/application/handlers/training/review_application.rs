//! ReviewApplicationHandler - admission review decisions.

use std::sync::Arc;

use crate::domain::foundation::{EnrollmentId, StaffId};
use crate::domain::training::{Enrollment, TrainingError};
use crate::ports::{
    EnrollmentRepository, NotificationLog, NotificationOutcome, NotificationRecord, RelatedEntity,
};

/// The decision taken on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    ScheduleInterview,
    Accept,
    Reject,
}

/// Command to record a review decision.
#[derive(Debug, Clone)]
pub struct ReviewApplicationCommand {
    pub enrollment_id: EnrollmentId,
    pub decision: ReviewDecision,
    pub reviewer: StaffId,
}

/// Handler for application review.
///
/// Acceptance never consumes a seat; seats move only at enrollment.
pub struct ReviewApplicationHandler {
    enrollments: Arc<dyn EnrollmentRepository>,
    notifications: Arc<dyn NotificationLog>,
}

impl ReviewApplicationHandler {
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
        cmd: ReviewApplicationCommand,
    ) -> Result<Enrollment, TrainingError> {
        let mut enrollment = self
            .enrollments
            .find_by_id(&cmd.enrollment_id)
            .await?
            .ok_or_else(|| TrainingError::enrollment_not_found(cmd.enrollment_id))?;

        let expected = enrollment.status();
        match cmd.decision {
            ReviewDecision::ScheduleInterview => enrollment.schedule_interview(cmd.reviewer)?,
            ReviewDecision::Accept => enrollment.accept_application(cmd.reviewer)?,
            ReviewDecision::Reject => enrollment.reject_application(cmd.reviewer)?,
        }

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

        let (subject, template) = match cmd.decision {
            ReviewDecision::ScheduleInterview => {
                ("Your admission interview", "interview_scheduled")
            }
            ReviewDecision::Accept => ("Your application was accepted", "application_accepted"),
            ReviewDecision::Reject => ("About your application", "application_rejected"),
        };
        let record = NotificationRecord::new(
            enrollment.contact().email(),
            subject,
            template,
            RelatedEntity::Enrollment(*enrollment.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, enrollment_id = %enrollment.id(), "failed to record notification");
        }

        Ok(enrollment)
    }
}
