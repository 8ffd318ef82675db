//! Quote request status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Intake received, quote not yet priced.
    Pending,

    /// Priced quote delivered to the client, awaiting a decision.
    Sent,

    /// Client accepted; a pending booking has been created. Terminal.
    Accepted,

    /// Client declined. Terminal.
    Rejected,

    /// Withdrawn before a decision. Terminal.
    Cancelled,
}

impl StateMachine for QuoteStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use QuoteStatus::*;
        matches!(
            (self, target),
            (Pending, Sent) | (Pending, Cancelled) | (Sent, Accepted) | (Sent, Rejected) | (Sent, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use QuoteStatus::*;
        match self {
            Pending => vec![Sent, Cancelled],
            Sent => vec![Accepted, Rejected, Cancelled],
            Accepted => vec![],
            Rejected => vec![],
            Cancelled => vec![],
        }
    }
}
