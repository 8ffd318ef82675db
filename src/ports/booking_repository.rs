//! Booking repository port (write side).

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, DomainError};

/// Repository port for Booking aggregate persistence.
///
/// Updates are compare-and-set on status: a write only lands if the stored
/// status still matches what the caller read, giving per-entity
/// serialization without a lock manager.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Save a new booking.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, booking: &Booking) -> Result<(), DomainError>;

    /// Find a booking by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// Persist `booking` only if the stored status still equals `expected`.
    ///
    /// Returns `false` when a concurrent writer got there first; the caller
    /// re-reads and reports against the committed state.
    ///
    /// # Errors
    ///
    /// - `BookingNotFound` if the booking doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_if_status(
        &self,
        booking: &Booking,
        expected: BookingStatus,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn BookingRepository) {}
    }
}
