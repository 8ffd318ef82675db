//! ConfirmBookingHandler - the conflict-gated transition to Confirmed.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, BookingStatus};
use crate::domain::foundation::BookingId;
use crate::domain::scheduling::ConflictDetector;
use crate::ports::{
    BookingRepository, NotificationLog, NotificationOutcome, NotificationRecord, RelatedEntity,
};

/// Command to confirm a pending booking.
#[derive(Debug, Clone)]
pub struct ConfirmBookingCommand {
    pub booking_id: BookingId,
}

/// Handler for booking confirmation.
///
/// The conflict check runs fresh against pending and confirmed holds, then
/// the transition commits with a compare-and-set on the Pending status. A
/// lost race surfaces as an invalid transition against the committed state.
pub struct ConfirmBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    conflicts: Arc<ConflictDetector>,
    notifications: Arc<dyn NotificationLog>,
}

impl ConfirmBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        conflicts: Arc<ConflictDetector>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            bookings,
            conflicts,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: ConfirmBookingCommand) -> Result<Booking, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or_else(|| BookingError::not_found(cmd.booking_id))?;

        let report = self
            .conflicts
            .check(
                booking.preferred_date(),
                booking.preferred_time(),
                Some(booking.id()),
            )
            .await?;
        if report.has_conflict() {
            return Err(BookingError::scheduling_conflict(
                report.conflicting_booking_ids,
            ));
        }

        booking.confirm()?;

        let committed = self
            .bookings
            .update_if_status(&booking, BookingStatus::Pending)
            .await?;
        if !committed {
            return Err(self.lost_race(&cmd.booking_id).await);
        }

        let record = NotificationRecord::new(
            booking.contact().email(),
            "Your booking is confirmed",
            "booking_confirmed",
            RelatedEntity::Booking(*booking.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, booking_id = %booking.id(), "failed to record notification");
        }

        Ok(booking)
    }

    async fn lost_race(&self, id: &BookingId) -> BookingError {
        match self.bookings.find_by_id(id).await {
            Ok(Some(current)) => BookingError::invalid_transition(format!(
                "Booking was concurrently moved to {:?}",
                current.status()
            )),
            Ok(None) => BookingError::not_found(*id),
            Err(err) => err.into(),
        }
    }
}
