use std::time::Duration;

use skirmish_core::{ErrorSeverity, GameError};

/// Protocol violations against the reaction arbiter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArbiterError {
    #[error("a reaction window for '{expected}' is already armed")]
    AlreadyArmed { expected: String },

    #[error("no reaction window is armed")]
    NotArmed,

    #[error("invalid reaction request (token '{token}', window {duration:?})")]
    InvalidRequest { token: String, duration: Duration },
}

impl GameError for ArbiterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Double arming means two turns overlapped for one defender.
            ArbiterError::AlreadyArmed { .. } => ErrorSeverity::Internal,
            ArbiterError::NotArmed | ArbiterError::InvalidRequest { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ArbiterError::AlreadyArmed { .. } => "ARBITER_ALREADY_ARMED",
            ArbiterError::NotArmed => "ARBITER_NOT_ARMED",
            ArbiterError::InvalidRequest { .. } => "ARBITER_INVALID_REQUEST",
        }
    }
}
