//! CancelCohortHandler - calls off a training intake.

use std::sync::Arc;

use crate::domain::foundation::CohortId;
use crate::domain::training::{Cohort, CohortStatus, TrainingError};
use crate::ports::CohortRepository;

/// Command to cancel a cohort.
#[derive(Debug, Clone)]
pub struct CancelCohortCommand {
    pub cohort_id: CohortId,
}

/// Handler for cohort cancellation.
///
/// Enrolled students keep their records; enrollment into the cohort simply
/// stops because its derived status becomes Cancelled.
pub struct CancelCohortHandler {
    cohorts: Arc<dyn CohortRepository>,
}

impl CancelCohortHandler {
    pub fn new(cohorts: Arc<dyn CohortRepository>) -> Self {
        Self { cohorts }
    }

    pub async fn handle(&self, cmd: CancelCohortCommand) -> Result<Cohort, TrainingError> {
        let mut cohort = self
            .cohorts
            .find_by_id(&cmd.cohort_id)
            .await?
            .ok_or_else(|| TrainingError::cohort_not_found(cmd.cohort_id))?;

        if cohort.status() == CohortStatus::Cancelled {
            return Err(TrainingError::invalid_transition(
                "Cohort is already cancelled",
            ));
        }

        cohort.cancel();
        self.cohorts.update_details(&cohort).await?;
        Ok(cohort)
    }
}
