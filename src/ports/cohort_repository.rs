//! Cohort repository port.

use async_trait::async_trait;

use crate::domain::foundation::{CohortId, DomainError};
use crate::domain::training::Cohort;

/// Repository port for Cohort persistence.
///
/// The seat counter is never written through this port; it moves only
/// inside the enrollment repository's atomic seat commits.
#[async_trait]
pub trait CohortRepository: Send + Sync {
    /// Save a new cohort.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, cohort: &Cohort) -> Result<(), DomainError>;

    /// Find a cohort by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &CohortId) -> Result<Option<Cohort>, DomainError>;

    /// Update a cohort's details (name, dates, cancellation flag). Must not
    /// write the seat counter.
    ///
    /// # Errors
    ///
    /// - `CohortNotFound` if the cohort doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_details(&self, cohort: &Cohort) -> Result<(), DomainError>;
}
