//! Command handlers.
//!
//! Each handler loads state through ports, runs the domain transition, and
//! commits it with a compare-and-set write. A failed compare-and-set means a
//! concurrent writer won; the handler re-reads and reports against the
//! committed state. Notification records are best-effort and never abort a
//! committed transition.

pub mod booking;
pub mod quote;
pub mod training;

#[cfg(test)]
pub(crate) mod testing;
