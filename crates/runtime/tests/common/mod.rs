#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use skirmish_core::{
    Ability, ActorState, BehaviorMode, BusyFlag, EntityId, Faction, HexCoord, TerrainMap,
};
use skirmish_runtime::{
    Battle, BattleBuilder, BattleHandle, Event, HudSink, MessageSeverity, PresentationSink,
    ReactionEvent, ScoringSink, Topic,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Movement(EntityId, HexCoord, HexCoord),
    Attack(EntityId),
    Defeat(EntityId),
    Score(u32),
    ResetCombo,
    Health(EntityId, u32, u32),
    ActionPoints(u32, u32),
    Log(String, MessageSeverity),
}

/// Records every collaborator call and, optionally, whether a watched actor
/// was busy when each animation started.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
    watched: Mutex<Option<BusyFlag>>,
    busy_samples: Mutex<Vec<(Call, bool)>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn watch(&self, flag: BusyFlag) {
        *self.watched.lock().unwrap() = Some(flag);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn busy_samples(&self) -> Vec<(Call, bool)> {
        self.busy_samples.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn record_animation(&self, call: Call) {
        if let Some(flag) = self.watched.lock().unwrap().as_ref() {
            self.busy_samples
                .lock()
                .unwrap()
                .push((call.clone(), flag.is_busy()));
        }
        self.record(call);
    }
}

#[async_trait]
impl PresentationSink for Recorder {
    async fn play_movement(&self, actor: EntityId, from: HexCoord, to: HexCoord) {
        self.record_animation(Call::Movement(actor, from, to));
    }

    async fn play_attack(&self, actor: EntityId) {
        self.record_animation(Call::Attack(actor));
    }

    async fn play_defeat(&self, actor: EntityId) {
        self.record_animation(Call::Defeat(actor));
    }
}

impl ScoringSink for Recorder {
    fn add_score(&self, amount: u32) {
        self.record(Call::Score(amount));
    }

    fn reset_combo(&self) {
        self.record(Call::ResetCombo);
    }
}

impl HudSink for Recorder {
    fn update_health(&self, actor: EntityId, current: u32, max: u32) {
        self.record(Call::Health(actor, current, max));
    }

    fn update_action_points(&self, _actor: EntityId, current: u32, max: u32) {
        self.record(Call::ActionPoints(current, max));
    }

    fn log_message(&self, text: &str, severity: MessageSeverity) {
        self.record(Call::Log(text.to_owned(), severity));
    }
}

pub fn player_at(col: i32, row: i32) -> ActorState {
    ActorState::new(EntityId::PLAYER, Faction::Player, HexCoord::new(col, row), 100)
}

pub fn enemy_at(id: u32, col: i32, row: i32) -> ActorState {
    ActorState::new(EntityId(id), Faction::Enemy, HexCoord::new(col, row), 20)
}

pub fn biter(id: u32, col: i32, row: i32, damage: u32) -> ActorState {
    enemy_at(id, col, row).with_abilities(vec![Ability::new("bite", damage, 60.0)])
}

pub fn kiter(id: u32, col: i32, row: i32) -> ActorState {
    enemy_at(id, col, row)
        .with_behavior(BehaviorMode::Kiting)
        .with_ranges(150.0, 120.0)
        .with_abilities(vec![Ability::new("arrow", 6, 200.0)])
}

/// Builder over an open 12x12 floor with every collaborator recorded.
pub fn builder(recorder: &Arc<Recorder>) -> BattleBuilder {
    Battle::builder()
        .terrain(Arc::new(TerrainMap::filled(12, 12)))
        .seed(42)
        .presentation(recorder.clone())
        .scoring(recorder.clone())
        .hud(recorder.clone())
}

/// Background task answering every reaction window through a handle.
pub struct Responder {
    task: tokio::task::JoinHandle<()>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl Responder {
    /// `respond` maps the expected token to the text to type, or `None` to
    /// stay silent; `delay` is waited after each window opens.
    pub fn spawn<F>(handle: BattleHandle, delay: Duration, respond: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + 'static,
    {
        let mut events = handle.subscribe(Topic::Reaction);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let task = tokio::spawn({
            let seen = Arc::clone(&seen);
            async move {
                while let Ok(event) = events.recv().await {
                    if let Event::Reaction(ReactionEvent::Armed { expected_token, .. }) = event {
                        seen.lock().unwrap().push(expected_token.clone());
                        tokio::time::sleep(delay).await;
                        if let Some(text) = respond(&expected_token) {
                            let _ = handle.submit_text(&text).await;
                        }
                    }
                }
            }
        });
        Self { task, seen }
    }

    /// Types the expected token as soon as the window opens.
    pub fn perfect(handle: BattleHandle) -> Self {
        Self::spawn(handle, Duration::ZERO, |token| Some(token.to_owned()))
    }

    /// Tokens of every window opened so far.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Drop for Responder {
    fn drop(&mut self) {
        self.task.abort();
    }
}
