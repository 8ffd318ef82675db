//! Booking - lifecycle of a client service booking.

mod aggregate;
mod errors;
mod status;

pub use aggregate::Booking;
pub use errors::BookingError;
pub use status::BookingStatus;
