//! Error classification shared by every battle error type.
//!
//! Domain errors (`OccupancyError`, `CommandError`, the runtime's arbiter and
//! battle errors) live next to the code they guard and implement [`GameError`]
//! so callers can tell a rejected command apart from a broken battle.

use strum::Display;

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ErrorSeverity {
    /// The same request may succeed later or with another choice.
    ///
    /// Destination occupied, not enough action points, target out of reach.
    Recoverable,

    /// Malformed input. Retrying unchanged fails again.
    Validation,

    /// A protocol was broken, e.g. arming an arbiter that is already armed.
    Internal,

    /// The battle cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }
}

/// Common trait for battle errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and turn reports.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_protocol_and_fatal_errors_stop_a_player() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(ErrorSeverity::Validation.is_recoverable());
        assert!(!ErrorSeverity::Internal.is_recoverable());
        assert!(!ErrorSeverity::Fatal.is_recoverable());
        assert_eq!(ErrorSeverity::Internal.to_string(), "internal");
    }
}
