//! Ports - interfaces between the core and the outside world.
//!
//! Following hexagonal architecture, ports define the contracts the
//! lifecycle managers depend on. Adapters implement these ports; handler
//! tests substitute in-memory doubles.

mod booking_repository;
mod cohort_repository;
mod enrollment_repository;
mod notification_log;
mod quote_repository;
mod schedule_index;
mod staff_directory;

pub use booking_repository::BookingRepository;
pub use cohort_repository::CohortRepository;
pub use enrollment_repository::{EnrollmentRepository, SeatCommit};
pub use notification_log::{NotificationLog, NotificationOutcome, NotificationRecord, RelatedEntity};
pub use quote_repository::QuoteRepository;
pub use schedule_index::{ScheduleIndex, ScheduledBooking};
pub use staff_directory::StaffDirectory;
