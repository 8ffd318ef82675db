//! Quote - lifecycle of a price-quote request.

mod aggregate;
mod errors;
mod status;

pub use aggregate::{ConflictCheck, QuoteRequest, SelectedServices};
pub use errors::QuoteError;
pub use status::QuoteStatus;
