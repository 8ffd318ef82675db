//! PostgreSQL adapters - database implementations of the repository ports.
//!
//! All lifecycle writes go through compare-and-set `UPDATE ... WHERE status`
//! statements; the enrollment repository additionally runs its seat commits
//! inside a transaction so the seat counter and the enrollment status always
//! move together.

mod booking_repository;
mod cohort_repository;
mod enrollment_repository;
mod notification_log;
mod quote_repository;
mod schedule_index;
mod staff_directory;

pub use booking_repository::PostgresBookingRepository;
pub use cohort_repository::PostgresCohortRepository;
pub use enrollment_repository::PostgresEnrollmentRepository;
pub use notification_log::PostgresNotificationLog;
pub use quote_repository::PostgresQuoteRepository;
pub use schedule_index::PostgresScheduleIndex;
pub use staff_directory::PostgresStaffDirectory;
