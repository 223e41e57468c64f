mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{Call, Recorder, Responder, biter, builder, player_at};
use skirmish_core::{
    AttackType, BattleStatus, CombatConfig, CommandError, ConfigError, EntityId, HexCoord,
    OccupancyError, PlayerSkill, ReactionCause, TerrainMap,
};
use skirmish_runtime::{
    AbortReason, Battle, CombatEvent, Event, InputRoute, PresentationSink, ReactionEvent,
    RuntimeError, Topic, TurnOutcome,
};

/// Attack animation that takes a full second.
struct SlowAttack;

#[async_trait]
impl PresentationSink for SlowAttack {
    async fn play_movement(&self, _actor: EntityId, _from: HexCoord, _to: HexCoord) {}

    async fn play_attack(&self, _actor: EntityId) {
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    async fn play_defeat(&self, _actor: EntityId) {}
}

fn skills() -> Vec<PlayerSkill> {
    vec![
        PlayerSkill::default(),
        PlayerSkill {
            command_name: "Shoot".into(),
            ap_cost: 3,
            damage: 4,
            attack_type: AttackType::RangedBow,
            description: "Arrow from afar".into(),
        },
    ]
}

#[tokio::test(start_paused = true)]
async fn player_commands_defeat_an_adjacent_enemy() {
    let recorder = Recorder::new();
    let mut battle = builder(&recorder)
        .skills(skills())
        .actor(player_at(5, 5))
        .actor(biter(1, 5, 6, 7))
        .build()
        .unwrap();
    let mut combat = battle.handle().subscribe(Topic::Combat);

    let attack = battle.execute_player_command(" PING ").await.unwrap();
    assert_eq!(attack.skill, "ping");
    assert_eq!(attack.target, EntityId(1));
    assert_eq!(attack.damage.applied, 10);
    assert_eq!(attack.action_points, 4);
    assert_eq!(recorder.count(|call| *call == Call::Score(5)), 1);
    assert_eq!(
        recorder.count(|call| *call == Call::Health(EntityId(1), 10, 20)),
        1
    );

    let attack = battle.execute_player_command("ping").await.unwrap();
    assert!(attack.damage.defeated);
    assert!(battle.state().actor(EntityId(1)).is_none());
    assert_eq!(battle.status(), BattleStatus::Victory);
    assert_eq!(recorder.count(|call| *call == Call::Defeat(EntityId(1))), 1);

    assert!(matches!(
        battle.execute_player_command("ping").await,
        Err(RuntimeError::BattleOver(BattleStatus::Victory))
    ));

    let mut defeated = Vec::new();
    while let Ok(event) = combat.try_recv() {
        if let Event::Combat(CombatEvent::Defeated { actor }) = event {
            defeated.push(actor);
        }
    }
    assert_eq!(defeated, vec![EntityId(1)]);
}

#[tokio::test(start_paused = true)]
async fn melee_needs_adjacency_and_action_points_are_budgeted() {
    let recorder = Recorder::new();
    let mut battle = builder(&recorder)
        .skills(skills())
        .actor(player_at(5, 5))
        .actor(biter(1, 5, 8, 7))
        .build()
        .unwrap();

    assert!(matches!(
        battle.execute_player_command("ping").await,
        Err(RuntimeError::Command(CommandError::TargetNotAdjacent(EntityId(1))))
    ));
    assert_eq!(battle.action_points().current(), 6);

    battle.execute_player_command("shoot").await.unwrap();
    let attack = battle.execute_player_command("shoot").await.unwrap();
    assert_eq!(attack.action_points, 0);
    assert_eq!(
        battle.state().actor(EntityId(1)).unwrap().hit_points.current,
        12
    );

    assert!(matches!(
        battle.execute_player_command("shoot").await,
        Err(RuntimeError::Command(CommandError::InsufficientActionPoints {
            required: 3,
            available: 0
        }))
    ));
    assert!(matches!(
        battle.execute_player_command("dance").await,
        Err(RuntimeError::Command(CommandError::UnknownCommand(name))) if name == "dance"
    ));

    battle.end_player_turn();
    assert_eq!(battle.action_points().current(), 6);
    assert_eq!(recorder.calls().last(), Some(&Call::ActionPoints(6, 6)));
}

#[tokio::test(start_paused = true)]
async fn input_outside_reaction_windows_becomes_a_command() {
    let recorder = Recorder::new();
    let mut battle = builder(&recorder)
        .actor(player_at(5, 5))
        .actor(biter(1, 5, 6, 7))
        .build()
        .unwrap();
    let handle = battle.handle();

    assert!(!handle.is_reaction_armed());
    assert_eq!(handle.submit_text("  Ping ").await.unwrap(), InputRoute::Command);
    assert_eq!(handle.submit_text("   ").await.unwrap(), InputRoute::Ignored);
    assert_eq!(battle.next_command().await.as_deref(), Some("ping"));
}

#[tokio::test(start_paused = true)]
async fn input_during_a_reaction_window_goes_to_the_arbiter() {
    let recorder = Recorder::new();
    let mut battle = builder(&recorder)
        .actor(player_at(5, 5))
        .actor(biter(1, 5, 6, 7))
        .build()
        .unwrap();
    let handle = battle.handle();
    let mut reactions = handle.subscribe(Topic::Reaction);

    let typist = tokio::spawn(async move {
        loop {
            if let Ok(Event::Reaction(ReactionEvent::Armed { .. })) =
                reactions.recv().await
            {
                break;
            }
        }
        assert!(handle.is_reaction_armed());
        assert_eq!(handle.expected_reaction().as_deref(), Some("parry"));
        handle.submit_text("parry").await.unwrap()
    });

    let report = battle.take_turn(EntityId(1)).await;
    assert_eq!(
        typist.await.unwrap(),
        InputRoute::Reaction(ReactionCause::Match)
    );
    assert!(report.reaction.unwrap().success);
}

#[tokio::test(start_paused = true)]
async fn full_round_alternates_player_and_enemy_phases() {
    let recorder = Recorder::new();
    let mut battle = builder(&recorder)
        .actor(player_at(5, 5))
        .actor(biter(1, 5, 6, 3))
        .actor(biter(2, 5, 2, 3))
        .build()
        .unwrap();
    let _responder = Responder::perfect(battle.handle());

    battle.execute_player_command("ping").await.unwrap();
    battle.end_player_turn();

    let reports = battle.run_enemy_phase().await.unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|report| !report.outcome.is_aborted()));
    assert_eq!(battle.status(), BattleStatus::Ongoing);
    assert_eq!(
        battle.state().actor(EntityId::PLAYER).unwrap().hit_points.current,
        100
    );
}

#[test]
fn builder_validates_the_roster() {
    let missing_terrain = Battle::builder().actor(player_at(0, 0)).build();
    assert!(matches!(missing_terrain, Err(RuntimeError::MissingTerrain)));

    let terrain = Arc::new(TerrainMap::filled(4, 4));
    let missing_player = Battle::builder()
        .terrain(terrain.clone())
        .actor(biter(1, 1, 1, 1))
        .build();
    assert!(matches!(missing_player, Err(RuntimeError::MissingPlayer)));

    let overlapping = Battle::builder()
        .terrain(terrain)
        .actor(player_at(1, 1))
        .actor(biter(1, 1, 1, 1))
        .build();
    assert!(matches!(
        overlapping,
        Err(RuntimeError::Occupancy(OccupancyError::Occupied { .. }))
    ));
}

#[test]
fn builder_rejects_reaction_windows_that_cannot_open() {
    let recorder = Recorder::new();
    let zero_window = builder(&recorder)
        .combat_config(CombatConfig {
            melee_reaction_secs: 0.0,
            ..CombatConfig::default()
        })
        .actor(player_at(5, 5))
        .actor(biter(1, 5, 6, 7))
        .build();
    assert!(matches!(
        zero_window,
        Err(RuntimeError::Config(ConfigError::NonPositiveWindow {
            field: "melee_reaction_secs",
            ..
        }))
    ));

    let blank_token = builder(&recorder)
        .combat_config(CombatConfig {
            ranged_token: String::new(),
            ..CombatConfig::default()
        })
        .actor(player_at(5, 5))
        .build();
    assert!(matches!(
        blank_token,
        Err(RuntimeError::Config(ConfigError::BlankToken { .. }))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn abort_during_a_reaction_window_never_deals_damage() {
    for _ in 0..25 {
        let recorder = Recorder::new();
        let mut battle = builder(&recorder)
            .actor(player_at(5, 5))
            .actor(biter(1, 5, 6, 7))
            .build()
            .unwrap();
        let handle = battle.handle();
        let mut reactions = handle.subscribe(Topic::Reaction);

        let turn = tokio::spawn(async move {
            let report = battle.take_turn(EntityId(1)).await;
            (report, battle)
        });
        loop {
            if let Ok(Event::Reaction(ReactionEvent::Armed { .. })) = reactions.recv().await {
                break;
            }
        }
        handle.abort();

        let (report, battle) = turn.await.unwrap();
        assert_eq!(report.outcome, TurnOutcome::Aborted(AbortReason::Cancelled));
        assert!(report.damage.is_none());
        assert_eq!(
            battle.state().actor(EntityId::PLAYER).unwrap().hit_points.current,
            100
        );
        assert_eq!(recorder.count(|call| *call == Call::ResetCombo), 0);
    }
}

#[tokio::test(start_paused = true)]
async fn abort_during_a_player_attack_refunds_action_points() {
    let recorder = Recorder::new();
    let mut battle = builder(&recorder)
        .presentation(Arc::new(SlowAttack))
        .actor(player_at(5, 5))
        .actor(biter(1, 5, 6, 7))
        .build()
        .unwrap();
    let handle = battle.handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();
    });

    assert!(matches!(
        battle.execute_player_command("ping").await,
        Err(RuntimeError::Aborted)
    ));
    assert_eq!(battle.action_points().current(), 6);
    assert_eq!(
        battle.state().actor(EntityId(1)).unwrap().hit_points.current,
        20
    );
    assert_eq!(recorder.count(|call| matches!(call, Call::Score(_))), 0);
    assert_eq!(recorder.calls().last(), Some(&Call::ActionPoints(6, 6)));

    assert!(matches!(
        battle.execute_player_command("ping").await,
        Err(RuntimeError::Aborted)
    ));
}
