//! Decision engine for enemy turns.
//!
//! Each turn runs three steps against a [`TurnContext`]:
//!
//! 1. **Movement intent**: advance, retreat or hold, from the actor's
//!    [`BehaviorMode`](skirmish_core::BehaviorMode) and distance to target
//! 2. **Destination**: the valid neighbor closest to the target (advancing)
//!    or to the repulsion point (retreating)
//! 3. **Ability**: a uniformly random ability that reaches, with the
//!    aggressive point-blank fallback

mod abilities;
mod context;
mod destination;
mod engine;
mod movement;

pub use abilities::select_ability;
pub use context::TurnContext;
pub use destination::choose_destination;
pub use engine::DecisionEngine;
pub use movement::{MovementIntent, movement_intent};
