//! Domain layer - aggregates, value objects, and pure business logic.
//!
//! Each entity is exclusively owned by its module; other modules only read
//! through the query ports in `crate::ports`.

pub mod booking;
pub mod foundation;
pub mod quote;
pub mod scheduling;
pub mod staff;
pub mod training;
