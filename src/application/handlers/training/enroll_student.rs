//! EnrollStudentHandler - the seat-gated transition into a cohort.

use std::sync::Arc;

use crate::domain::foundation::{CohortId, EnrollmentId};
use crate::domain::training::{Enrollment, TrainingError};
use crate::ports::{
    CohortRepository, EnrollmentRepository, NotificationLog, NotificationOutcome,
    NotificationRecord, RelatedEntity, SeatCommit,
};

/// Command to place an accepted student in a cohort.
#[derive(Debug, Clone)]
pub struct EnrollStudentCommand {
    pub enrollment_id: EnrollmentId,
    pub cohort_id: CohortId,
}

/// Handler for student enrollment.
///
/// The capacity invariant is enforced at the commit: the seat increment and
/// the status change land atomically, and the commit refuses to overfill
/// the cohort however many enrollments race for the last seat.
pub struct EnrollStudentHandler {
    enrollments: Arc<dyn EnrollmentRepository>,
    cohorts: Arc<dyn CohortRepository>,
    notifications: Arc<dyn NotificationLog>,
}

impl EnrollStudentHandler {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        cohorts: Arc<dyn CohortRepository>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            enrollments,
            cohorts,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: EnrollStudentCommand) -> Result<Enrollment, TrainingError> {
        let mut enrollment = self
            .enrollments
            .find_by_id(&cmd.enrollment_id)
            .await?
            .ok_or_else(|| TrainingError::enrollment_not_found(cmd.enrollment_id))?;

        let cohort = self
            .cohorts
            .find_by_id(&cmd.cohort_id)
            .await?
            .ok_or_else(|| TrainingError::cohort_not_found(cmd.cohort_id))?;
        if !cohort.is_open_for_enrollment() {
            return Err(TrainingError::cohort_closed(cmd.cohort_id));
        }

        let expected = enrollment.status();
        enrollment.enroll(cmd.cohort_id)?;

        match self
            .enrollments
            .commit_enrollment(&enrollment, &cmd.cohort_id, expected)
            .await?
        {
            SeatCommit::Committed => {}
            SeatCommit::CohortFull => {
                return Err(TrainingError::cohort_full(cmd.cohort_id));
            }
            SeatCommit::StateChanged => {
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
            format!("Welcome to {}", cohort.name()),
            "enrollment_confirmed",
            RelatedEntity::Enrollment(*enrollment.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, enrollment_id = %enrollment.id(), "failed to record notification");
        }

        Ok(enrollment)
    }
}
