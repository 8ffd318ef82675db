//! Booking lifecycle handlers.

mod assign_booking;
mod cancel_booking;
mod complete_booking;
mod confirm_booking;
mod create_booking;

pub use assign_booking::{AssignBookingCommand, AssignBookingHandler};
pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler};
pub use complete_booking::{CompleteBookingCommand, CompleteBookingHandler};
pub use confirm_booking::{ConfirmBookingCommand, ConfirmBookingHandler};
pub use create_booking::{CreateBookingCommand, CreateBookingHandler};
