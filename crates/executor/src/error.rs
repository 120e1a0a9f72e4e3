use core_types::Leg;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("The broadcaster rejected the {leg} transaction: {reason}")]
    Submission { leg: Leg, reason: String },

    #[error("Confirmation of the {leg} transaction failed: {reason}")]
    Confirmation { leg: Leg, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ExecutorError {
    /// The leg the failure occurred on, when there is one.
    pub fn leg(&self) -> Option<Leg> {
        match self {
            ExecutorError::Submission { leg, .. } | ExecutorError::Confirmation { leg, .. } => {
                Some(*leg)
            }
            ExecutorError::Configuration(_) => None,
        }
    }
}
