//! Stdout-backed collaborators and board rendering.
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use skirmish_core::{
    BattleState, EntityId, Faction, HexCoord, MapDimensions, TerrainKind, TerrainOracle,
};
use skirmish_runtime::{HudSink, MessageSeverity, PresentationSink, ScoringSink};

/// Prints animations as lines and paces them with a short pause.
pub struct TerminalPresentation {
    pause: Duration,
}

impl TerminalPresentation {
    pub fn new(pause: Duration) -> Self {
        Self { pause }
    }

    async fn pace(&self) {
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
    }
}

#[async_trait]
impl PresentationSink for TerminalPresentation {
    async fn play_movement(&self, actor: EntityId, from: HexCoord, to: HexCoord) {
        println!("  {} moves {} -> {}", actor_label(actor), from, to);
        self.pace().await;
    }

    async fn play_attack(&self, actor: EntityId) {
        println!("  {} attacks", actor_label(actor));
        self.pace().await;
    }

    async fn play_defeat(&self, actor: EntityId) {
        println!("  {} falls", actor_label(actor));
        self.pace().await;
    }
}

/// HUD printing health changes and the combat log.
pub struct TerminalHud;

impl HudSink for TerminalHud {
    fn update_health(&self, actor: EntityId, current: u32, max: u32) {
        println!("  [{}] HP {}/{}", actor_label(actor), current, max);
    }

    fn update_action_points(&self, _actor: EntityId, current: u32, max: u32) {
        println!("  [AP] {}/{}", current, max);
    }

    fn log_message(&self, text: &str, severity: MessageSeverity) {
        let marker = match severity {
            MessageSeverity::Info => " ",
            MessageSeverity::Success => "+",
            MessageSeverity::Warning => "!",
            MessageSeverity::Danger => "x",
        };
        println!("{marker} {text}");
    }
}

/// Score with a combo counter that grows with consecutive successes.
#[derive(Default)]
pub struct ScoreBoard {
    score: AtomicU32,
    combo: AtomicU32,
}

impl ScoreBoard {
    pub fn score(&self) -> u32 {
        self.score.load(Ordering::Relaxed)
    }
}

impl ScoringSink for ScoreBoard {
    fn add_score(&self, amount: u32) {
        let combo = self.combo.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.score.fetch_add(amount, Ordering::Relaxed) + amount;
        println!("  score {total} (combo x{combo})");
    }

    fn reset_combo(&self) {
        self.combo.store(0, Ordering::Relaxed);
    }
}

fn actor_label(actor: EntityId) -> String {
    if actor.is_player() {
        "You".to_owned()
    } else {
        format!("Enemy {}", actor.0)
    }
}

/// Renders the board as text: `@` for the player, enemy ids as digits
/// (`E` above 9) and terrain glyphs elsewhere. Each row takes two lines with
/// odd columns on the second, mirroring their half-tile shift.
pub fn render_board(
    terrain: &dyn TerrainOracle,
    dimensions: MapDimensions,
    state: &BattleState,
) -> String {
    let glyph = |coord: HexCoord| -> char {
        if let Some(actor) = state
            .occupancy()
            .occupant(coord)
            .and_then(|id| state.actor(id))
        {
            return match actor.faction {
                Faction::Player => '@',
                Faction::Enemy => char::from_digit(actor.id.0, 10).unwrap_or('E'),
            };
        }
        match terrain.tile(coord).map(|tile| tile.terrain()) {
            Some(TerrainKind::Floor) => '.',
            Some(TerrainKind::Wall) => '#',
            Some(TerrainKind::Water) => '~',
            None => ' ',
        }
    };

    let mut out = String::new();
    for row in 0..dimensions.height as i32 {
        for shifted in [false, true] {
            let line: String = (0..dimensions.width as i32)
                .map(|col| {
                    if (col & 1 == 1) == shifted {
                        glyph(HexCoord::new(col, row))
                    } else {
                        ' '
                    }
                })
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use skirmish_core::{ActorState, TerrainMap};

    use super::*;

    #[test]
    fn board_marks_actors_and_staggers_odd_columns() {
        let mut map = TerrainMap::filled(3, 2);
        map.set(HexCoord::new(2, 1), TerrainKind::Wall);

        let mut state = BattleState::new();
        state
            .spawn(ActorState::new(EntityId::PLAYER, Faction::Player, HexCoord::new(0, 0), 10))
            .unwrap();
        state
            .spawn(ActorState::new(EntityId(3), Faction::Enemy, HexCoord::new(1, 1), 10))
            .unwrap();

        let board = render_board(&map, map.dimensions(), &state);
        assert_eq!(board, "@ .\n .\n. #\n 3\n");
    }

    #[test]
    fn score_accumulates_until_combo_reset() {
        let board = ScoreBoard::default();
        board.add_score(10);
        board.add_score(5);
        board.reset_combo();
        assert_eq!(board.score(), 15);
        assert_eq!(board.combo.load(Ordering::Relaxed), 0);
    }
}
