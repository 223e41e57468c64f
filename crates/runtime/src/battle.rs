//! Battle driver.
//!
//! [`Battle`] owns the battle state and runs player commands and enemy phases
//! one at a time. [`BattleHandle`] is the cloneable input surface clients use
//! to type commands and reaction tokens from other tasks.

use std::sync::Arc;

use skirmish_core::{
    ActionPoints, ActorState, BattleState, BattleStatus, CombatConfig, CommandError,
    DamageOutcome, EntityId, Faction, PlayerSkill, SkillBook, TerrainOracle, apply_damage,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{
    BattleHandle, HudSink, MessageSeverity, PresentationSink, Result, RuntimeError, ScoringSink,
};
use crate::events::{CombatEvent, EventBus};
use crate::providers::ai::DecisionEngine;
use crate::reaction::ReactionArbiter;
use crate::turn::{Collaborators, TurnOrchestrator, TurnReport, until_cancelled};

/// Battle configuration shared by the driver and the orchestrator.
#[derive(Debug, Clone)]
pub struct BattleConfig {
    pub combat: CombatConfig,
    /// Seed for ability choice; `None` draws from entropy.
    pub seed: Option<u64>,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            seed: None,
            command_buffer_size: 32,
            event_buffer_size: 100,
        }
    }
}

/// Result of a successful player command.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerAttack {
    pub skill: String,
    pub target: EntityId,
    pub damage: DamageOutcome,
    pub action_points: u32,
}

/// One battle between the player and a set of enemies.
pub struct Battle {
    state: BattleState,
    orchestrator: TurnOrchestrator,
    skills: SkillBook,
    action_points: ActionPoints,
    command_rx: mpsc::Receiver<String>,
    cancel: CancellationToken,
    handle: BattleHandle,
}

impl Battle {
    pub fn builder() -> BattleBuilder {
        BattleBuilder::new()
    }

    /// Get a cloneable handle to this battle
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn status(&self) -> BattleStatus {
        self.state.status()
    }

    pub fn skills(&self) -> &SkillBook {
        &self.skills
    }

    pub fn action_points(&self) -> ActionPoints {
        self.action_points
    }

    pub fn terrain(&self) -> &dyn TerrainOracle {
        self.orchestrator.terrain()
    }

    pub fn is_aborted(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Runs a single actor's turn. External schedulers call this directly.
    pub async fn take_turn(&mut self, actor: EntityId) -> TurnReport {
        self.orchestrator
            .take_turn(actor, &mut self.state, &self.cancel)
            .await
    }

    /// Runs every living enemy's turn in id order, then removes the defeated.
    ///
    /// Stops early if the battle ends or is aborted.
    pub async fn run_enemy_phase(&mut self) -> Result<Vec<TurnReport>> {
        self.ensure_ongoing()?;

        let enemies: Vec<EntityId> = self
            .state
            .living(Faction::Enemy)
            .map(|actor| actor.id)
            .collect();
        info!(target: "runtime::battle", enemies = enemies.len(), "Enemy phase started");

        let mut reports = Vec::with_capacity(enemies.len());
        for enemy in enemies {
            if self.cancel.is_cancelled() || self.state.status() != BattleStatus::Ongoing {
                break;
            }
            reports.push(self.take_turn(enemy).await);
        }

        self.remove_defeated();
        info!(target: "runtime::battle", status = %self.status(), "Enemy phase ended");
        Ok(reports)
    }

    /// Executes a typed player command against the nearest enemy.
    ///
    /// Melee and unarmed skills need the target to be a hex neighbor. Action
    /// points are only spent once the command is known to be executable, and
    /// are refunded if the battle is aborted before the attack lands.
    pub async fn execute_player_command(&mut self, text: &str) -> Result<PlayerAttack> {
        self.ensure_ongoing()?;
        if self.cancel.is_cancelled() {
            return Err(RuntimeError::Aborted);
        }

        let skill = self.skills.resolve(text)?.clone();
        let (target, target_position) = self
            .state
            .nearest_hostile(EntityId::PLAYER)
            .and_then(|id| self.state.actor(id))
            .map(|target| (target.id, target.position()))
            .ok_or(CommandError::NoTarget)?;
        let player_position = self
            .state
            .actor(EntityId::PLAYER)
            .map(ActorState::position)
            .ok_or(RuntimeError::MissingPlayer)?;

        if skill.attack_type.requires_adjacency() && !player_position.is_neighbor(target_position)
        {
            return Err(CommandError::TargetNotAdjacent(target).into());
        }
        self.action_points.spend(skill.ap_cost)?;

        let damage = self.resolve_player_attack(&skill, target).await?;
        Ok(PlayerAttack {
            skill: skill.command_name,
            target,
            damage,
            action_points: self.action_points.current(),
        })
    }

    /// Refills action points for the next player turn.
    pub fn end_player_turn(&mut self) {
        self.action_points.refill();
        self.hud().update_action_points(
            EntityId::PLAYER,
            self.action_points.current(),
            self.action_points.maximum(),
        );
        debug!(target: "runtime::battle", "Player turn ended");
    }

    /// Next command submitted through the handle, or `None` once the battle
    /// is aborted.
    pub async fn next_command(&mut self) -> Option<String> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            command = self.command_rx.recv() => command,
        }
    }

    /// Aborts the battle; see [`BattleHandle::abort`].
    pub fn abort(&self) {
        self.handle.abort();
    }

    async fn resolve_player_attack(
        &mut self,
        skill: &PlayerSkill,
        target: EntityId,
    ) -> Result<DamageOutcome> {
        let collaborators = self.orchestrator.collaborators().clone();
        let events = self.orchestrator.events().clone();
        collaborators.hud.update_action_points(
            EntityId::PLAYER,
            self.action_points.current(),
            self.action_points.maximum(),
        );
        let landed = until_cancelled(
            collaborators.presentation.play_attack(EntityId::PLAYER),
            &self.cancel,
        )
        .await;
        if !landed {
            self.action_points.refund(skill.ap_cost);
            collaborators.hud.update_action_points(
                EntityId::PLAYER,
                self.action_points.current(),
                self.action_points.maximum(),
            );
            info!(target: "runtime::battle", skill = %skill.command_name, "Player attack aborted");
            return Err(RuntimeError::Aborted);
        }

        let defender = self
            .state
            .actor_mut(target)
            .ok_or(RuntimeError::UnknownActor(target))?;
        let damage = apply_damage(&mut defender.hit_points, skill.damage);
        let maximum = defender.hit_points.maximum;

        collaborators
            .scoring
            .add_score(self.orchestrator.config().player_hit_score);
        collaborators.hud.update_health(target, damage.remaining, maximum);
        collaborators.hud.log_message(
            &format!(
                "{} hits {} for {} damage",
                skill.command_name, target, damage.applied
            ),
            MessageSeverity::Info,
        );
        info!(
            target: "runtime::battle",
            skill = %skill.command_name,
            defender = %target,
            applied = damage.applied,
            remaining = damage.remaining,
            "Player attack resolved"
        );
        events.publish(CombatEvent::DamageApplied {
            attacker: EntityId::PLAYER,
            target,
            ability: skill.command_name.clone(),
            damage,
        });

        if damage.defeated {
            events.publish(CombatEvent::Defeated { actor: target });
            collaborators
                .hud
                .log_message(&format!("{target} is defeated"), MessageSeverity::Success);
            until_cancelled(collaborators.presentation.play_defeat(target), &self.cancel).await;
            self.remove_defeated();
        }
        Ok(damage)
    }

    fn remove_defeated(&mut self) {
        let removed = self.state.remove_defeated();
        if !removed.is_empty() {
            info!(target: "runtime::battle", ?removed, "Defeated actors removed");
        }
    }

    fn ensure_ongoing(&self) -> Result<()> {
        match self.state.status() {
            BattleStatus::Ongoing => Ok(()),
            status => Err(RuntimeError::BattleOver(status)),
        }
    }

    fn hud(&self) -> &dyn HudSink {
        self.orchestrator.collaborators().hud.as_ref()
    }
}

/// Builder for constructing a [`Battle`].
pub struct BattleBuilder {
    config: BattleConfig,
    terrain: Option<Arc<dyn TerrainOracle>>,
    actors: Vec<ActorState>,
    skills: Vec<PlayerSkill>,
    collaborators: Collaborators,
}

impl BattleBuilder {
    fn new() -> Self {
        Self {
            config: BattleConfig::default(),
            terrain: None,
            actors: Vec::new(),
            skills: Vec::new(),
            collaborators: Collaborators::default(),
        }
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn combat_config(mut self, combat: CombatConfig) -> Self {
        self.config.combat = combat;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn terrain(mut self, terrain: Arc<dyn TerrainOracle>) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn actor(mut self, actor: ActorState) -> Self {
        self.actors.push(actor);
        self
    }

    pub fn actors(mut self, actors: impl IntoIterator<Item = ActorState>) -> Self {
        self.actors.extend(actors);
        self
    }

    /// Player skills; an empty list falls back to the default skill.
    pub fn skills(mut self, skills: Vec<PlayerSkill>) -> Self {
        self.skills = skills;
        self
    }

    pub fn presentation(mut self, presentation: Arc<dyn PresentationSink>) -> Self {
        self.collaborators.presentation = presentation;
        self
    }

    pub fn scoring(mut self, scoring: Arc<dyn ScoringSink>) -> Self {
        self.collaborators.scoring = scoring;
        self
    }

    pub fn hud(mut self, hud: Arc<dyn HudSink>) -> Self {
        self.collaborators.hud = hud;
        self
    }

    /// Validates placement and wires the orchestrator, arbiter and channels.
    pub fn build(self) -> Result<Battle> {
        let terrain = self.terrain.ok_or(RuntimeError::MissingTerrain)?;
        self.config.combat.validate()?;

        let mut state = BattleState::new();
        for actor in self.actors {
            if !terrain.is_walkable(actor.position()) {
                warn!(
                    target: "runtime::battle",
                    actor = %actor.id,
                    position = %actor.position(),
                    "Actor spawned on a non-walkable cell"
                );
            }
            state.spawn(actor)?;
        }
        if state.actor(EntityId::PLAYER).is_none() {
            return Err(RuntimeError::MissingPlayer);
        }

        let combat = Arc::new(self.config.combat);
        let engine = match self.config.seed {
            Some(seed) => DecisionEngine::seeded(Arc::clone(&combat), seed),
            None => DecisionEngine::new(Arc::clone(&combat)),
        };

        let skills = if self.skills.is_empty() {
            vec![PlayerSkill::default()]
        } else {
            self.skills
        };
        let action_points = ActionPoints::new(combat.player_max_action_points);

        let events = EventBus::with_capacity(self.config.event_buffer_size);
        let arbiter = ReactionArbiter::new();
        let cancel = CancellationToken::new();
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size.max(1));
        let handle = BattleHandle::new(
            arbiter.clone(),
            command_tx,
            cancel.clone(),
            events.clone(),
        );

        let orchestrator =
            TurnOrchestrator::new(terrain, self.collaborators, arbiter, engine, events);

        info!(
            target: "runtime::battle",
            actors = state.actors().count(),
            seed = ?self.config.seed,
            "Battle ready"
        );

        Ok(Battle {
            state,
            orchestrator,
            skills: SkillBook::new(skills),
            action_points,
            command_rx,
            cancel,
            handle,
        })
    }
}
