use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use skirmish_core::{
    Ability, BattleState, CombatConfig, DamageOutcome, EntityId, GameError, ReactionKind,
    ReactionOutcome, TerrainOracle, apply_damage,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::report::{AbortReason, SkipReason, TurnOutcome, TurnReport};
use crate::api::{
    HudSink, InstantPresentation, MessageSeverity, NullScoring, PresentationSink, ScoringSink,
    TracingHud,
};
use crate::events::{CombatEvent, EventBus, ReactionEvent, TurnEvent};
use crate::providers::ai::{DecisionEngine, TurnContext};
use crate::reaction::ReactionArbiter;

/// External collaborators a turn reports to.
#[derive(Clone)]
pub struct Collaborators {
    pub presentation: Arc<dyn PresentationSink>,
    pub scoring: Arc<dyn ScoringSink>,
    pub hud: Arc<dyn HudSink>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            presentation: Arc::new(InstantPresentation),
            scoring: Arc::new(NullScoring),
            hud: Arc::new(TracingHud),
        }
    }
}

/// Runs enemy turns: target acquisition, movement, attack, reaction and damage.
///
/// Turns are executed one at a time; the battle state is borrowed mutably for
/// the whole turn. The arbiter is the defender's and is shared with the input
/// surface that submits reaction tokens.
pub struct TurnOrchestrator {
    terrain: Arc<dyn TerrainOracle>,
    collaborators: Collaborators,
    arbiter: ReactionArbiter,
    engine: DecisionEngine,
    config: Arc<CombatConfig>,
    events: EventBus,
}

impl TurnOrchestrator {
    pub fn new(
        terrain: Arc<dyn TerrainOracle>,
        collaborators: Collaborators,
        arbiter: ReactionArbiter,
        engine: DecisionEngine,
        events: EventBus,
    ) -> Self {
        let config = engine.shared_config();
        Self {
            terrain,
            collaborators,
            arbiter,
            engine,
            config,
            events,
        }
    }

    pub fn arbiter(&self) -> &ReactionArbiter {
        &self.arbiter
    }

    pub fn terrain(&self) -> &dyn TerrainOracle {
        self.terrain.as_ref()
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Runs one full turn for `actor`.
    ///
    /// Never fails: every path, including protocol violations and battle
    /// cancellation, ends in a [`TurnReport`] with the actor no longer busy.
    /// Calling this while the actor is already mid-turn is a no-op.
    pub async fn take_turn(
        &mut self,
        actor: EntityId,
        state: &mut BattleState,
        cancel: &CancellationToken,
    ) -> TurnReport {
        let mut report = TurnReport::new(actor);

        let busy = match state.actor(actor) {
            None => return report.finish(TurnOutcome::Skipped(SkipReason::Missing)),
            Some(current) if !current.is_alive() => {
                return report.finish(TurnOutcome::Skipped(SkipReason::Defeated));
            }
            Some(current) => match current.busy_flag().try_acquire() {
                Some(guard) => guard,
                None => {
                    debug!(target: "runtime::turn", %actor, "Actor is busy, ignoring turn request");
                    return report.finish(TurnOutcome::Skipped(SkipReason::Busy));
                }
            },
        };

        info!(target: "runtime::turn", %actor, "Turn started");
        self.events.publish(TurnEvent::Started { actor });

        let outcome = self.run_phases(actor, state, cancel, &mut report).await;
        drop(busy);

        if let Some(target) = report.target
            && report.defeated_target()
        {
            self.notify_defeat(target, cancel).await;
        }

        info!(target: "runtime::turn", %actor, outcome = ?outcome, "Turn ended");
        self.events.publish(TurnEvent::Ended {
            actor,
            outcome: outcome.clone(),
        });
        report.finish(outcome)
    }

    async fn run_phases(
        &mut self,
        actor: EntityId,
        state: &mut BattleState,
        cancel: &CancellationToken,
        report: &mut TurnReport,
    ) -> TurnOutcome {
        let Some(target) = self.acquire_target(actor, state) else {
            warn!(target: "runtime::turn", %actor, "No target available, idling");
            return self.pause(self.config.idle_delay(), TurnOutcome::Idle, cancel).await;
        };
        report.target = Some(target);

        let mut ctx = {
            let grid = state.grid(self.terrain.as_ref());
            match (state.actor(actor), state.actor(target)) {
                (Some(attacker), Some(defender)) => TurnContext::new(attacker, defender, &grid),
                _ => return self.pause(self.config.idle_delay(), TurnOutcome::Idle, cancel).await,
            }
        };

        if !self.move_phase(&mut ctx, state, cancel, report).await {
            return TurnOutcome::Aborted(AbortReason::Cancelled);
        }

        let ability = state
            .actor(actor)
            .and_then(|attacker| self.engine.select_ability(&ctx, &attacker.abilities).cloned());

        let Some(ability) = ability else {
            debug!(
                target: "runtime::turn",
                %actor,
                distance = ctx.distance,
                "No ability reaches the target, passing"
            );
            return self.pause(self.config.pass_delay(), TurnOutcome::Passed, cancel).await;
        };
        report.ability = Some(ability.name.clone());
        ctx.ability = Some(ability.clone());

        let attack = self.collaborators.presentation.play_attack(actor);
        if !until_cancelled(attack, cancel).await {
            return TurnOutcome::Aborted(AbortReason::Cancelled);
        }

        let outcome = match self.await_reaction(&ctx, &ability, cancel).await {
            Ok(outcome) => outcome,
            Err(reason) => return TurnOutcome::Aborted(reason),
        };
        report.reaction = Some(outcome);

        let Some(damage) = self.apply_outcome(&ctx, &ability, outcome, state) else {
            return TurnOutcome::Passed;
        };
        report.damage = Some(damage);
        TurnOutcome::Attacked
    }

    /// Keeps a still-valid target, otherwise re-acquires the nearest hostile once.
    fn acquire_target(&self, actor: EntityId, state: &mut BattleState) -> Option<EntityId> {
        let current = state.actor(actor)?.target;
        if let Some(target) = current
            && state.is_valid_target(actor, target)
        {
            return Some(target);
        }

        let reacquired = state.nearest_hostile(actor);
        if let Some(attacker) = state.actor_mut(actor) {
            attacker.target = reacquired;
        }
        if let Some(target) = reacquired {
            debug!(target: "runtime::turn", %actor, defender = %target, "Target acquired");
        }
        reacquired
    }

    /// Returns false if the battle was cancelled during the movement animation.
    async fn move_phase(
        &self,
        ctx: &mut TurnContext,
        state: &mut BattleState,
        cancel: &CancellationToken,
        report: &mut TurnReport,
    ) -> bool {
        let (_, destination) = self
            .engine
            .plan_destination(ctx, &state.grid(self.terrain.as_ref()));
        if destination == ctx.position {
            return true;
        }

        let from = match state.move_actor(ctx.actor, destination) {
            Ok(from) => from,
            Err(err) => {
                warn!(
                    target: "runtime::turn",
                    actor = %ctx.actor,
                    to = %destination,
                    error = %err,
                    "Move rejected, staying in place"
                );
                return true;
            }
        };

        ctx.relocate(destination, &state.grid(self.terrain.as_ref()));
        ctx.destination = Some(destination);
        report.moved = Some((from, destination));
        self.events.publish(TurnEvent::Moved {
            actor: ctx.actor,
            from,
            to: destination,
        });

        let animation = self
            .collaborators
            .presentation
            .play_movement(ctx.actor, from, destination);
        until_cancelled(animation, cancel).await
    }

    async fn await_reaction(
        &self,
        ctx: &TurnContext,
        ability: &Ability,
        cancel: &CancellationToken,
    ) -> Result<ReactionOutcome, AbortReason> {
        let kind = ReactionKind::for_ability(ability, &self.config);
        let request = kind.request(&self.config);
        let expected_token = request.expected_token().to_owned();
        let window = request.duration();

        let mut handle = match self.arbiter.arm(request) {
            Ok(handle) => handle,
            Err(err) => {
                error!(
                    target: "runtime::turn",
                    actor = %ctx.actor,
                    code = err.error_code(),
                    error = %err,
                    "Reaction arbiter refused to arm, aborting turn"
                );
                return Err(AbortReason::Protocol {
                    code: err.error_code().to_owned(),
                    message: err.to_string(),
                });
            }
        };

        self.events.publish(ReactionEvent::Armed {
            attacker: ctx.actor,
            defender: ctx.target,
            expected_token: expected_token.clone(),
            window_ms: u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
        });
        self.collaborators.hud.log_message(
            &format!(
                "{} uses {}! Type '{}' to {}",
                ctx.actor,
                ability.name,
                expected_token,
                kind.to_string().to_lowercase()
            ),
            MessageSeverity::Warning,
        );

        let outcome = tokio::select! {
            outcome = handle.outcome() => Some(outcome),
            _ = cancel.cancelled() => None,
        };

        // An abort sets the token before it cancels the arbiter, so a window
        // closed by the abort is never scored as a failed reaction.
        let Some(outcome) = outcome.filter(|_| !cancel.is_cancelled()) else {
            drop(handle);
            info!(target: "runtime::turn", actor = %ctx.actor, "Reaction wait cancelled");
            return Err(AbortReason::Cancelled);
        };

        info!(
            target: "runtime::turn",
            actor = %ctx.actor,
            defender = %ctx.target,
            success = outcome.success,
            cause = ?outcome.cause,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Reaction resolved"
        );
        self.events.publish(ReactionEvent::Resolved {
            attacker: ctx.actor,
            defender: ctx.target,
            outcome,
        });
        Ok(outcome)
    }

    fn apply_outcome(
        &self,
        ctx: &TurnContext,
        ability: &Ability,
        outcome: ReactionOutcome,
        state: &mut BattleState,
    ) -> Option<DamageOutcome> {
        let Some(defender) = state.actor_mut(ctx.target) else {
            warn!(target: "runtime::turn", defender = %ctx.target, "Target vanished before damage");
            return None;
        };

        let Collaborators { scoring, hud, .. } = &self.collaborators;
        let damage = if outcome.success {
            scoring.add_score(self.config.parry_score);
            hud.log_message(">>> PERFECT DEFENSE!", MessageSeverity::Success);
            DamageOutcome::nullified(ability.damage, &defender.hit_points)
        } else {
            scoring.reset_combo();
            let damage = apply_damage(&mut defender.hit_points, ability.damage);
            hud.log_message(
                &format!(
                    "{} takes {} damage from {} ({})",
                    ctx.target, damage.raw, ability.name, outcome.cause
                ),
                MessageSeverity::Danger,
            );
            damage
        };
        hud.update_health(ctx.target, damage.remaining, defender.hit_points.maximum);

        debug!(
            target: "runtime::turn",
            actor = %ctx.actor,
            defender = %ctx.target,
            raw = damage.raw,
            applied = damage.applied,
            remaining = damage.remaining,
            "Damage applied"
        );
        self.events.publish(CombatEvent::DamageApplied {
            attacker: ctx.actor,
            target: ctx.target,
            ability: ability.name.clone(),
            damage,
        });
        Some(damage)
    }

    async fn notify_defeat(&self, target: EntityId, cancel: &CancellationToken) {
        info!(target: "runtime::turn", actor = %target, "Actor defeated");
        self.events.publish(CombatEvent::Defeated { actor: target });
        self.collaborators
            .hud
            .log_message(&format!("{target} is defeated"), MessageSeverity::Danger);

        let animation = self.collaborators.presentation.play_defeat(target);
        until_cancelled(animation, cancel).await;
    }

    /// Sleeps for `delay`, then reports `outcome` unless the battle was cancelled.
    async fn pause(
        &self,
        delay: Duration,
        outcome: TurnOutcome,
        cancel: &CancellationToken,
    ) -> TurnOutcome {
        if until_cancelled(tokio::time::sleep(delay), cancel).await {
            outcome
        } else {
            TurnOutcome::Aborted(AbortReason::Cancelled)
        }
    }
}

/// Drives `future` to completion unless `cancel` fires first.
///
/// Returns false if cancelled.
pub(crate) async fn until_cancelled<F>(future: F, cancel: &CancellationToken) -> bool
where
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = future => true,
    }
}
