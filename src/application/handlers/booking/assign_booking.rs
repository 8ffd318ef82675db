//! AssignBookingHandler - routes a booking to an eligible staff member.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, ErrorCode, StaffId};
use crate::domain::staff::{AssignmentResolver, ServiceCategory};
use crate::ports::BookingRepository;

/// Command to assign a staff member to a booking.
#[derive(Debug, Clone)]
pub struct AssignBookingCommand {
    pub booking_id: BookingId,
    pub staff_id: StaffId,
}

/// Handler for booking assignment.
///
/// The service category is inferred from the booking's service type and the
/// resolver vets the staff member against it before anything is written.
pub struct AssignBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    resolver: Arc<AssignmentResolver>,
}

impl AssignBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>, resolver: Arc<AssignmentResolver>) -> Self {
        Self { bookings, resolver }
    }

    pub async fn handle(&self, cmd: AssignBookingCommand) -> Result<Booking, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or_else(|| BookingError::not_found(cmd.booking_id))?;

        let category = ServiceCategory::infer(booking.service_type());
        self.resolver
            .resolve(category, &cmd.staff_id)
            .await
            .map_err(|err| match err.code {
                ErrorCode::StaffNotFound => BookingError::StaffNotFound(cmd.staff_id),
                ErrorCode::IneligibleAssignee => {
                    BookingError::ineligible_assignee(cmd.staff_id, err.message)
                }
                _ => err.into(),
            })?;

        let expected = booking.status();
        booking.assign(cmd.staff_id)?;

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

        Ok(booking)
    }
}
