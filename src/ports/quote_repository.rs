//! Quote repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, QuoteId};
use crate::domain::quote::{QuoteRequest, QuoteStatus};

/// Repository port for QuoteRequest aggregate persistence.
///
/// Same compare-and-set discipline as the booking repository: a transition
/// only commits against the status the caller validated.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Save a new quote request.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, quote: &QuoteRequest) -> Result<(), DomainError>;

    /// Find a quote request by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<QuoteRequest>, DomainError>;

    /// Persist `quote` only if the stored status still equals `expected`.
    ///
    /// Returns `false` when a concurrent writer got there first.
    ///
    /// # Errors
    ///
    /// - `QuoteNotFound` if the quote doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_if_status(
        &self,
        quote: &QuoteRequest,
        expected: QuoteStatus,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn QuoteRepository) {}
    }
}
