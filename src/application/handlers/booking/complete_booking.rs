//! CompleteBookingHandler - closes out a delivered booking.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, BookingStatus};
use crate::domain::foundation::BookingId;
use crate::ports::{
    BookingRepository, NotificationLog, NotificationOutcome, NotificationRecord, RelatedEntity,
};

/// Command to mark a confirmed booking as completed.
#[derive(Debug, Clone)]
pub struct CompleteBookingCommand {
    pub booking_id: BookingId,
}

/// Handler for booking completion.
pub struct CompleteBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    notifications: Arc<dyn NotificationLog>,
}

impl CompleteBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            bookings,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: CompleteBookingCommand) -> Result<Booking, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or_else(|| BookingError::not_found(cmd.booking_id))?;

        booking.complete()?;

        let committed = self
            .bookings
            .update_if_status(&booking, BookingStatus::Confirmed)
            .await?;
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
            "Thank you for shooting with us",
            "booking_completed",
            RelatedEntity::Booking(*booking.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, booking_id = %booking.id(), "failed to record notification");
        }

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{InMemoryBookings, RecordingLog};
    use crate::domain::foundation::{ContactInfo, Timestamp};
    use chrono::NaiveTime;

    fn confirmed_booking_due_today() -> Booking {
        let mut booking = Booking::new(
            BookingId::new(),
            ContactInfo::new("Amina Odhiambo", "amina@example.com", "+254700000001").unwrap(),
            "Portrait Session".to_string(),
            Timestamp::today(),
            NaiveTime::from_hms_opt(10, 0, 0),
        )
        .unwrap();
        booking.confirm().unwrap();
        booking
    }

    #[tokio::test]
    async fn completes_confirmed_booking_on_its_date() {
        let booking = confirmed_booking_due_today();
        let id = *booking.id();
        let repo = InMemoryBookings::with(vec![booking]);
        let log = RecordingLog::new();
        let handler = CompleteBookingHandler::new(repo.clone(), log.clone());

        let completed = handler
            .handle(CompleteBookingCommand { booking_id: id })
            .await
            .unwrap();

        assert_eq!(completed.status(), BookingStatus::Completed);
        assert!(completed.completed_at().is_some());
        assert_eq!(log.records()[0].template, "booking_completed");
    }

    #[tokio::test]
    async fn completing_a_future_booking_fails() {
        let booking = Booking::new(
            BookingId::new(),
            ContactInfo::new("Amina Odhiambo", "amina@example.com", "+254700000001").unwrap(),
            "Portrait Session".to_string(),
            Timestamp::today() + chrono::Duration::days(7),
            None,
        )
        .unwrap();
        let id = *booking.id();
        let mut confirmed = booking;
        confirmed.confirm().unwrap();
        let repo = InMemoryBookings::with(vec![confirmed]);
        let handler = CompleteBookingHandler::new(repo.clone(), RecordingLog::new());

        let result = handler
            .handle(CompleteBookingCommand { booking_id: id })
            .await;
        assert!(matches!(result, Err(BookingError::ValidationFailed { .. })));
        assert_eq!(repo.get(&id).unwrap().status(), BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn completing_a_pending_booking_fails() {
        let booking = Booking::new(
            BookingId::new(),
            ContactInfo::new("Amina Odhiambo", "amina@example.com", "+254700000001").unwrap(),
            "Portrait Session".to_string(),
            Timestamp::today(),
            None,
        )
        .unwrap();
        let id = *booking.id();
        let repo = InMemoryBookings::with(vec![booking]);
        let handler = CompleteBookingHandler::new(repo, RecordingLog::new());

        let result = handler
            .handle(CompleteBookingCommand { booking_id: id })
            .await;
        assert!(matches!(result, Err(BookingError::InvalidTransition(_))));
    }
}
