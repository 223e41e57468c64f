//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate:
//! errors, the collaborator ports and the input handle.

pub mod errors;
pub mod handle;
pub mod sinks;

pub use errors::{Result, RuntimeError};
pub use handle::{BattleHandle, InputRoute};
pub use sinks::{
    HudSink, InstantPresentation, MessageSeverity, NullScoring, PresentationSink, ScoringSink,
    TracingHud,
};
