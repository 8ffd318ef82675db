//! CreateCohortHandler - opens a new training intake.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::CohortId;
use crate::domain::training::{Cohort, TrainingError};
use crate::ports::CohortRepository;

/// Command to create a cohort.
#[derive(Debug, Clone)]
pub struct CreateCohortCommand {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_students: u32,
}

/// Handler for cohort creation.
pub struct CreateCohortHandler {
    cohorts: Arc<dyn CohortRepository>,
}

impl CreateCohortHandler {
    pub fn new(cohorts: Arc<dyn CohortRepository>) -> Self {
        Self { cohorts }
    }

    pub async fn handle(&self, cmd: CreateCohortCommand) -> Result<Cohort, TrainingError> {
        let cohort = Cohort::new(
            CohortId::new(),
            cmd.name,
            cmd.start_date,
            cmd.end_date,
            cmd.max_students,
        )?;
        self.cohorts.save(&cohort).await?;
        Ok(cohort)
    }
}
