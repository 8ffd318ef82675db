//! Enrollment repository port.
//!
//! Seat accounting lives here rather than on the cohort repository: the
//! enrollment status change and the cohort seat counter must move in the
//! same atomic unit, so the port exposes combined commit operations.

use async_trait::async_trait;

use crate::domain::foundation::{CohortId, DomainError, EnrollmentId};
use crate::domain::training::{Enrollment, EnrollmentStatus};

/// Outcome of an atomic seat-and-status commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatCommit {
    /// Both the enrollment status and the seat counter were written.
    Committed,
    /// The cohort had no free seat; nothing was written.
    CohortFull,
    /// The enrollment's stored status no longer matched what the caller
    /// read; nothing was written.
    StateChanged,
}

/// Repository port for Enrollment persistence and seat accounting.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Save a new enrollment application.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError>;

    /// Find an enrollment by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError>;

    /// Persist `enrollment` only if the stored status still equals
    /// `expected`. Returns `false` when a concurrent writer got there first.
    ///
    /// Only for transitions that do not touch a seat; enrolment into and
    /// withdrawal from a cohort go through the commit operations below.
    ///
    /// # Errors
    ///
    /// - `EnrollmentNotFound` if the enrollment doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_if_status(
        &self,
        enrollment: &Enrollment,
        expected: EnrollmentStatus,
    ) -> Result<bool, DomainError>;

    /// Atomically place `enrollment` in `cohort`: write its new status and
    /// increment the cohort's seat counter in one unit, but only while the
    /// counter is below capacity and the stored status still equals
    /// `expected`. Either both writes land or neither does.
    ///
    /// # Errors
    ///
    /// - `EnrollmentNotFound` / `CohortNotFound` if either row is missing
    /// - `DatabaseError` on persistence failure
    async fn commit_enrollment(
        &self,
        enrollment: &Enrollment,
        cohort: &CohortId,
        expected: EnrollmentStatus,
    ) -> Result<SeatCommit, DomainError>;

    /// Atomically withdraw `enrollment` from `cohort`: write its new status
    /// and decrement the cohort's seat counter in one unit, but only while
    /// the stored status still equals `expected`.
    ///
    /// Never reports `CohortFull`; a withdrawal only frees capacity.
    ///
    /// # Errors
    ///
    /// - `EnrollmentNotFound` / `CohortNotFound` if either row is missing
    /// - `DatabaseError` on persistence failure
    async fn commit_withdrawal(
        &self,
        enrollment: &Enrollment,
        cohort: &CohortId,
        expected: EnrollmentStatus,
    ) -> Result<SeatCommit, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EnrollmentRepository) {}
    }
}
