//! Combat resolution rules shared by the runtime and tooling.
mod damage;
mod reaction;

pub use damage::{DamageOutcome, apply_damage};
pub use reaction::{
    ReactionCause, ReactionKind, ReactionOutcome, ReactionRequest, normalize_token,
};
