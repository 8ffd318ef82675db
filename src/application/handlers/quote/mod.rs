//! Quote lifecycle handlers.

mod accept_quote;
mod assign_quote;
mod close_quote;
mod create_quote;
mod send_quote;

pub use accept_quote::{AcceptQuoteCommand, AcceptQuoteHandler, AcceptQuoteResult};
pub use assign_quote::{AssignQuoteCommand, AssignQuoteHandler};
pub use close_quote::{CloseQuoteCommand, CloseQuoteHandler, QuoteResolution};
pub use create_quote::{CreateQuoteCommand, CreateQuoteHandler};
pub use send_quote::{SendQuoteCommand, SendQuoteHandler};
