//! Enrollment and cohort status types.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Application and enrollment lifecycle of a prospective student.
///
/// `Withdrawn` is a distinct terminal state for students who leave after
/// enrolling; it releases their seat, unlike `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Application received.
    Pending,

    /// An admission interview has been arranged.
    InterviewScheduled,

    /// Application approved; no seat consumed yet.
    Accepted,

    /// Application declined. Terminal.
    Rejected,

    /// Seat consumed in a cohort.
    Enrolled,

    /// Left the programme after enrolling; seat released. Terminal.
    Withdrawn,

    /// Finished the programme; seat still counted. Terminal.
    Completed,
}

impl EnrollmentStatus {
    /// Returns true if this status consumes a cohort seat.
    ///
    /// Completed students still count against historical capacity; only
    /// withdrawal releases a seat.
    pub fn consumes_seat(&self) -> bool {
        matches!(self, EnrollmentStatus::Enrolled | EnrollmentStatus::Completed)
    }
}

impl StateMachine for EnrollmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EnrollmentStatus::*;
        matches!(
            (self, target),
            (Pending, InterviewScheduled)
                | (Pending, Accepted)
                | (Pending, Rejected)
                | (InterviewScheduled, Accepted)
                | (InterviewScheduled, Rejected)
                | (Accepted, Enrolled)
                | (Accepted, Rejected)
                | (Enrolled, Completed)
                | (Enrolled, Withdrawn)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EnrollmentStatus::*;
        match self {
            Pending => vec![InterviewScheduled, Accepted, Rejected],
            InterviewScheduled => vec![Accepted, Rejected],
            Accepted => vec![Enrolled, Rejected],
            Enrolled => vec![Completed, Withdrawn],
            Rejected => vec![],
            Withdrawn => vec![],
            Completed => vec![],
        }
    }
}

/// Cohort status, derived from the date range and explicit cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortStatus {
    Upcoming,
    Active,
    Completed,
    Cancelled,
}
