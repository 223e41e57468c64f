//! Battle session wiring and the player/enemy phase loop.
use std::sync::Arc;

use anyhow::{Context, Result};
use skirmish_content::{ConfigLoader, ContentFactory, RosterLoader, SkillLoader, TerrainLoader};
use skirmish_core::{
    ActorState, BattleStatus, CombatConfig, GameError, MapDimensions, PlayerSkill, TerrainMap,
};
use skirmish_runtime::{Battle, BattleConfig, BattleHandle, InputRoute};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{CliConfig, ContentPaths};
use crate::presentation::{ScoreBoard, TerminalHud, TerminalPresentation, render_board};

const END_TURN: &str = "end";
const QUIT: &str = "quit";

/// Content resolved for one battle.
struct Content {
    combat: CombatConfig,
    actors: Vec<ActorState>,
    skills: Vec<PlayerSkill>,
    terrain: TerrainMap,
}

impl Content {
    /// Explicit file paths win over the data directory, which wins over the
    /// embedded defaults.
    fn load(paths: &ContentPaths) -> Result<Self> {
        let factory = match &paths.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::embedded(),
        };

        let combat = match &paths.config {
            Some(path) => ConfigLoader::load(path)?,
            None => factory.load_config()?,
        };
        let actors = match &paths.roster {
            Some(path) => RosterLoader::load(path)?.into_actors(),
            None => factory.load_roster()?,
        };
        let skills = match &paths.skills {
            Some(path) => SkillLoader::load(path)?,
            None => factory.load_skills()?,
        };
        let terrain = match &paths.map {
            Some(path) => TerrainLoader::load(path)?,
            None => factory.load_terrain()?,
        };

        Ok(Self {
            combat,
            actors,
            skills,
            terrain,
        })
    }
}

/// Terminal battle session.
pub struct CliApp {
    battle: Battle,
    dimensions: MapDimensions,
    score: Arc<ScoreBoard>,
}

impl CliApp {
    pub fn new(config: &CliConfig) -> Result<Self> {
        let content = Content::load(&config.content).context("Failed to load battle content")?;
        let dimensions = content.terrain.dimensions();
        let score = Arc::new(ScoreBoard::default());

        let battle = Battle::builder()
            .config(BattleConfig {
                combat: content.combat,
                seed: config.seed,
                command_buffer_size: config.command_buffer,
                ..BattleConfig::default()
            })
            .terrain(Arc::new(content.terrain))
            .actors(content.actors)
            .skills(content.skills)
            .presentation(Arc::new(TerminalPresentation::new(config.animation)))
            .hud(Arc::new(TerminalHud))
            .scoring(score.clone())
            .build()
            .context("Failed to build battle")?;

        Ok(Self {
            battle,
            dimensions,
            score,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let handle = self.battle.handle();
        let reader = spawn_stdin_reader(handle.clone());
        let interrupt = spawn_interrupt_watcher(handle);

        let result = self.play().await;

        reader.abort();
        interrupt.abort();
        result
    }

    async fn play(&mut self) -> Result<()> {
        println!("Type a skill to attack, '{END_TURN}' to end your turn, '{QUIT}' to leave.");

        loop {
            self.player_phase().await;
            if self.battle.is_aborted() || self.battle.status() != BattleStatus::Ongoing {
                break;
            }

            println!("\n-- Enemy turn --");
            self.battle.run_enemy_phase().await?;
            if self.battle.is_aborted() || self.battle.status() != BattleStatus::Ongoing {
                break;
            }
        }

        match self.battle.status() {
            BattleStatus::Victory => println!("\nVictory! Final score: {}", self.score.score()),
            BattleStatus::Defeat => println!("\nDefeat. Final score: {}", self.score.score()),
            BattleStatus::Ongoing => println!("\nBattle abandoned."),
        }
        info!(status = %self.battle.status(), score = self.score.score(), "Battle finished");
        Ok(())
    }

    async fn player_phase(&mut self) {
        println!("\n-- Your turn --");
        print!(
            "{}",
            render_board(self.battle.terrain(), self.dimensions, self.battle.state())
        );
        let skills: Vec<String> = self
            .battle
            .skills()
            .iter()
            .map(|skill| format!("{} ({} AP)", skill.command_name, skill.ap_cost))
            .collect();
        println!(
            "Skills: {}  |  AP {}/{}",
            skills.join(", "),
            self.battle.action_points().current(),
            self.battle.action_points().maximum()
        );

        while let Some(command) = self.battle.next_command().await {
            if command == END_TURN {
                break;
            }
            match self.battle.execute_player_command(&command).await {
                Ok(attack) => {
                    debug!(skill = %attack.skill, defender = %attack.target, "Player attack")
                }
                Err(err) if err.severity().is_recoverable() => println!("  {err}"),
                Err(err) => {
                    warn!(error = %err, code = err.error_code(), "Player command failed");
                    println!("  {err}");
                }
            }
            if self.battle.status() != BattleStatus::Ongoing {
                return;
            }
        }
        self.battle.end_player_turn();
    }
}

/// Forwards stdin lines to the battle until EOF or `quit`, then aborts it.
fn spawn_stdin_reader(handle: BattleHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    warn!(error = %err, "Failed to read stdin");
                    break;
                }
            };
            if line.trim().eq_ignore_ascii_case(QUIT) {
                break;
            }

            match handle.submit_text(&line).await {
                Ok(InputRoute::Late) => println!("  Too late!"),
                Ok(route) => debug!(?route, "Input routed"),
                Err(err) => {
                    warn!(error = %err, "Input surface closed");
                    break;
                }
            }
        }
        handle.abort();
    })
}

fn spawn_interrupt_watcher(handle: BattleHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted");
            handle.abort();
        }
    })
}
