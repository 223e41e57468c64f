//! Decision providers for non-player actors.

pub mod ai;

pub use ai::{DecisionEngine, MovementIntent, TurnContext};
