//! Turn orchestration: one atomic, busy-guarded turn per actor.

mod orchestrator;
mod report;

pub(crate) use orchestrator::until_cancelled;
pub use orchestrator::{Collaborators, TurnOrchestrator};
pub use report::{AbortReason, SkipReason, TurnOutcome, TurnReport};
