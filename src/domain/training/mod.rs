//! Training - cohort capacity and student enrollment lifecycle.

mod cohort;
mod enrollment;
mod errors;
mod status;

pub use cohort::Cohort;
pub use enrollment::Enrollment;
pub use errors::TrainingError;
pub use status::{CohortStatus, EnrollmentStatus};
