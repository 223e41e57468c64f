//! Unified error types surfaced by the runtime API.
//!
//! Turn execution itself never fails with an error; these cover battle
//! construction, player commands and the input surface.

use skirmish_core::{
    BattleStatus, CommandError, ConfigError, EntityId, ErrorSeverity, GameError, OccupancyError,
};
use thiserror::Error;

use crate::reaction::ArbiterError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("battle requires a player actor")]
    MissingPlayer,

    #[error("battle requires terrain to be configured before building")]
    MissingTerrain,

    #[error("actor {0} is not part of this battle")]
    UnknownActor(EntityId),

    #[error("battle already ended ({0})")]
    BattleOver(BattleStatus),

    #[error("battle command channel closed")]
    CommandChannelClosed,

    #[error("battle was aborted")]
    Aborted,

    #[error("invalid combat config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Occupancy(#[from] OccupancyError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Arbiter(#[from] ArbiterError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::MissingPlayer
            | RuntimeError::MissingTerrain
            | RuntimeError::UnknownActor(_)
            | RuntimeError::BattleOver(_) => ErrorSeverity::Validation,
            RuntimeError::CommandChannelClosed | RuntimeError::Aborted => ErrorSeverity::Fatal,
            RuntimeError::Config(err) => err.severity(),
            RuntimeError::Occupancy(err) => err.severity(),
            RuntimeError::Command(err) => err.severity(),
            RuntimeError::Arbiter(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::MissingPlayer => "RUNTIME_MISSING_PLAYER",
            RuntimeError::MissingTerrain => "RUNTIME_MISSING_TERRAIN",
            RuntimeError::UnknownActor(_) => "RUNTIME_UNKNOWN_ACTOR",
            RuntimeError::BattleOver(_) => "RUNTIME_BATTLE_OVER",
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::Aborted => "RUNTIME_ABORTED",
            RuntimeError::Config(err) => err.error_code(),
            RuntimeError::Occupancy(err) => err.error_code(),
            RuntimeError::Command(err) => err.error_code(),
            RuntimeError::Arbiter(err) => err.error_code(),
        }
    }
}
