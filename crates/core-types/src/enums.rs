use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which leg of the pipeline a submission or confirmation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leg {
    /// The optional allowance-granting transaction that must be mined before the swap.
    Approval,
    /// The swap transaction itself, whose receipt is the user-visible outcome.
    Swap,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::Approval => write!(f, "approval"),
            Leg::Swap => write!(f, "swap"),
        }
    }
}
