//! CreateBookingHandler - intake of a new booking request.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, ContactInfo, DomainError};
use crate::ports::{
    BookingRepository, NotificationLog, NotificationOutcome, NotificationRecord, RelatedEntity,
};

/// Command to record a new booking request.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub budget_range: Option<String>,
    pub additional_notes: Option<String>,
}

/// Handler for booking intake.
///
/// Intake does not run conflict detection; a pending booking is an advisory
/// hold and the slot is contested only at confirmation.
pub struct CreateBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    notifications: Arc<dyn NotificationLog>,
}

impl CreateBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        notifications: Arc<dyn NotificationLog>,
    ) -> Self {
        Self {
            bookings,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: CreateBookingCommand) -> Result<Booking, BookingError> {
        let contact =
            ContactInfo::new(cmd.name, cmd.email, cmd.phone).map_err(DomainError::from)?;
        let booking = Booking::new(
            BookingId::new(),
            contact,
            cmd.service_type,
            cmd.preferred_date,
            cmd.preferred_time,
        )?
        .with_location(cmd.location)
        .with_budget_range(cmd.budget_range)
        .with_notes(cmd.additional_notes);

        self.bookings.save(&booking).await?;

        let record = NotificationRecord::new(
            booking.contact().email(),
            "We received your booking request",
            "booking_received",
            RelatedEntity::Booking(*booking.id()),
            NotificationOutcome::Pending,
        );
        if let Err(err) = self.notifications.record(&record).await {
            tracing::warn!(error = %err, booking_id = %booking.id(), "failed to record notification");
        }

        Ok(booking)
    }
}
