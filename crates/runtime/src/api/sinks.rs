//! Collaborator ports the battle calls into.
//!
//! Presentation is awaited because turns wait for animation completion.
//! Scoring and HUD updates are fire-and-forget notifications.
use async_trait::async_trait;
use skirmish_core::{EntityId, HexCoord};
use strum::Display;
use tracing::{debug, info, warn};

/// Plays animations and resolves once they complete.
#[async_trait]
pub trait PresentationSink: Send + Sync {
    async fn play_movement(&self, actor: EntityId, from: HexCoord, to: HexCoord);

    async fn play_attack(&self, actor: EntityId);

    async fn play_defeat(&self, actor: EntityId);
}

/// Score and combo tracking.
pub trait ScoringSink: Send + Sync {
    fn add_score(&self, amount: u32);

    fn reset_combo(&self);
}

/// Tone of a combat log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum MessageSeverity {
    Info,
    Success,
    Warning,
    Danger,
}

/// Health bars, action point counters and the combat log.
pub trait HudSink: Send + Sync {
    fn update_health(&self, actor: EntityId, current: u32, max: u32);

    fn update_action_points(&self, actor: EntityId, current: u32, max: u32);

    fn log_message(&self, text: &str, severity: MessageSeverity);
}

/// Presentation sink whose animations complete immediately.
/// Useful for headless battles and tests.
pub struct InstantPresentation;

#[async_trait]
impl PresentationSink for InstantPresentation {
    async fn play_movement(&self, _actor: EntityId, _from: HexCoord, _to: HexCoord) {}

    async fn play_attack(&self, _actor: EntityId) {}

    async fn play_defeat(&self, _actor: EntityId) {}
}

/// Scoring sink that discards every notification.
pub struct NullScoring;

impl ScoringSink for NullScoring {
    fn add_score(&self, _amount: u32) {}

    fn reset_combo(&self) {}
}

/// HUD sink that forwards everything to `tracing`.
pub struct TracingHud;

impl HudSink for TracingHud {
    fn update_health(&self, actor: EntityId, current: u32, max: u32) {
        debug!(target: "runtime::hud", %actor, current, max, "health");
    }

    fn update_action_points(&self, actor: EntityId, current: u32, max: u32) {
        debug!(target: "runtime::hud", %actor, current, max, "action points");
    }

    fn log_message(&self, text: &str, severity: MessageSeverity) {
        match severity {
            MessageSeverity::Warning | MessageSeverity::Danger => {
                warn!(target: "runtime::hud", %severity, "{text}")
            }
            MessageSeverity::Info | MessageSeverity::Success => {
                info!(target: "runtime::hud", %severity, "{text}")
            }
        }
    }
}
