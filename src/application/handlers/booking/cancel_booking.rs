//! CancelBookingHandler - releases a booking's hold on the schedule.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::BookingId;
use crate::ports::{
    BookingRepository, NotificationLog, NotificationOutcome, NotificationRecord, RelatedEntity,
};

/// Command to cancel a pending or confirmed booking.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub booking_id: BookingId,
    pub reason: Option<String>,
}

/// Handler for booking cancellation.
///
/// The compare-and-set write serializes concurrent cancellations: exactly
/// one caller commits the transition, the rest see an invalid transition
/// against the already-cancelled state.
pub struct CancelBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    notifications: Arc<dyn NotificationLog>,
}

impl CancelBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            bookings,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: CancelBookingCommand) -> Result<Booking, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or_else(|| BookingError::not_found(cmd.booking_id))?;

        let expected = booking.status();
        booking.cancel(cmd.reason)?;

        let committed = self.bookings.update_if_status(&booking, expected).await?;
        if !committed {
            let current = self
                .bookings
                .find_by_id(&cmd.booking_id)
                .await?
                .ok_or_else(|| BookingError::not_found(cmd.booking_id))?;
            return Err(BookingError::invalid_transition(format!(
                "Booking was concurrently moved to {:?}",
                current.status()
            )));
        }

        let record = NotificationRecord::new(
            booking.contact().email(),
            "Your booking has been cancelled",
            "booking_cancelled",
            RelatedEntity::Booking(*booking.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, booking_id = %booking.id(), "failed to record notification");
        }

        Ok(booking)
    }
}
