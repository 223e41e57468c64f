//! Timed reaction windows.
//!
//! A [`ReactionArbiter`] runs one countdown against one expected token. The
//! countdown, the defender's typed input and external cancellation all race
//! to resolve the same window; the first to get there decides the
//! [`ReactionOutcome`](skirmish_core::ReactionOutcome) and every later
//! attempt is discarded.
mod arbiter;
mod error;

pub use arbiter::{ArbiterPhase, ReactionArbiter, ReactionHandle};
pub use error::ArbiterError;
