//! Training programme handlers - cohorts and student enrollment.

mod cancel_cohort;
mod complete_training;
mod create_cohort;
mod enroll_student;
mod record_payment;
mod review_application;
mod submit_application;
mod withdraw_student;

pub use cancel_cohort::{CancelCohortCommand, CancelCohortHandler};
pub use complete_training::{CompleteTrainingCommand, CompleteTrainingHandler};
pub use create_cohort::{CreateCohortCommand, CreateCohortHandler};
pub use enroll_student::{EnrollStudentCommand, EnrollStudentHandler};
pub use record_payment::{RecordPaymentCommand, RecordPaymentHandler};
pub use review_application::{ReviewApplicationCommand, ReviewApplicationHandler, ReviewDecision};
pub use submit_application::{SubmitApplicationCommand, SubmitApplicationHandler};
pub use withdraw_student::{WithdrawStudentCommand, WithdrawStudentHandler};
