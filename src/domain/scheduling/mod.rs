//! Scheduling - slot overlap math and the conflict detector.
//!
//! The conflict detector is a pure read over the schedule index; callers
//! persist its result.

mod conflict;
mod slot;

pub use conflict::{ConflictDetector, ConflictReport};
pub use slot::{slots_overlap, SlotDuration, DEFAULT_SLOT_MINUTES};
