//! Player-side commands: skills typed during the player's turn and the action
//! point budget that pays for them.
mod points;
mod skill;

pub use points::ActionPoints;
pub use skill::{AttackType, PlayerSkill, SkillBook};

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("not enough action points: need {required}, have {available}")]
    InsufficientActionPoints { required: u32, available: u32 },

    #[error("no target in sight")]
    NoTarget,

    #[error("target {0} is not adjacent")]
    TargetNotAdjacent(EntityId),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CommandError::Empty | CommandError::UnknownCommand(_) => ErrorSeverity::Validation,
            CommandError::InsufficientActionPoints { .. }
            | CommandError::NoTarget
            | CommandError::TargetNotAdjacent(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CommandError::Empty => "COMMAND_EMPTY",
            CommandError::UnknownCommand(_) => "COMMAND_UNKNOWN",
            CommandError::InsufficientActionPoints { .. } => "COMMAND_INSUFFICIENT_AP",
            CommandError::NoTarget => "COMMAND_NO_TARGET",
            CommandError::TargetNotAdjacent(_) => "COMMAND_TARGET_NOT_ADJACENT",
        }
    }
}
