//! Async battle runtime for the hex-grid combat core.
//!
//! This crate wires the reaction arbiter, the enemy decision engine and the
//! turn orchestrator into a [`Battle`] that clients drive turn by turn, typing
//! commands and reaction tokens through a [`BattleHandle`].
//!
//! Modules are organized by responsibility:
//! - [`battle`] hosts the driver and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`reaction`] runs timed, exactly-once reaction windows
//! - [`providers`] decides enemy movement and ability use
//! - [`turn`] sequences one actor's turn
pub mod api;
pub mod battle;
pub mod events;
pub mod providers;
pub mod reaction;
pub mod turn;

pub use api::{
    BattleHandle, HudSink, InputRoute, InstantPresentation, MessageSeverity, NullScoring,
    PresentationSink, Result, RuntimeError, ScoringSink, TracingHud,
};
pub use battle::{Battle, BattleBuilder, BattleConfig, PlayerAttack};
pub use events::{CombatEvent, Event, EventBus, ReactionEvent, Topic, TurnEvent};
pub use providers::{DecisionEngine, MovementIntent, TurnContext};
pub use reaction::{ArbiterError, ArbiterPhase, ReactionArbiter, ReactionHandle};
pub use turn::{AbortReason, Collaborators, SkipReason, TurnOrchestrator, TurnOutcome, TurnReport};
