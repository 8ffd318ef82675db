//! Booking status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a service booking.
///
/// Transitions are monotonic except that `Cancelled` is reachable from any
/// non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Initial state; an advisory hold on the schedule.
    Pending,

    /// Studio has committed to the date and time.
    Confirmed,

    /// Booking was called off before completion. Terminal.
    Cancelled,

    /// Work was delivered. Terminal.
    Completed,
}

impl BookingStatus {
    /// Returns true if this booking occupies schedule capacity.
    ///
    /// Pending and Confirmed bookings hold their slot; Cancelled and
    /// Completed ones never conflict.
    pub fn is_committed(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl StateMachine for BookingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use BookingStatus::*;
        matches!(
            (self, target),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use BookingStatus::*;
        match self {
            Pending => vec![Confirmed, Cancelled],
            Confirmed => vec![Completed, Cancelled],
            Cancelled => vec![],
            Completed => vec![],
        }
    }
}
