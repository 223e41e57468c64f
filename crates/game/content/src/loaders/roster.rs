//! Roster loader for the player spawn and enemy definitions.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use skirmish_core::{Ability, ActorState, BehaviorMode, EntityId, Faction, HexCoord};

use crate::loaders::{LoadResult, read_file};

/// Player spawn data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub position: HexCoord,
    pub hit_points: u32,
}

/// One enemy entry. Omitted fields fall back to the actor defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub position: HexCoord,
    pub hit_points: u32,
    #[serde(default)]
    pub behavior: BehaviorMode,
    #[serde(default = "default_attack_range")]
    pub attack_range: f32,
    #[serde(default = "default_safe_distance")]
    pub safe_distance: f32,
    /// Empty lists become the basic attack.
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

fn default_attack_range() -> f32 {
    ActorState::DEFAULT_ATTACK_RANGE
}

fn default_safe_distance() -> f32 {
    ActorState::DEFAULT_SAFE_DISTANCE
}

impl EnemySpec {
    /// Name for logs and HUD messages.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            EntityId(self.id).to_string()
        } else {
            self.name.clone()
        }
    }

    pub fn to_actor(&self) -> ActorState {
        ActorState::new(
            EntityId(self.id),
            Faction::Enemy,
            self.position,
            self.hit_points,
        )
        .with_behavior(self.behavior)
        .with_ranges(self.attack_range, self.safe_distance)
        .with_abilities(self.abilities.clone())
    }
}

/// Complete roster for one battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterSpec {
    pub player: PlayerSpec,
    pub enemies: Vec<EnemySpec>,
}

impl RosterSpec {
    /// Player first, then enemies in file order.
    pub fn into_actors(self) -> Vec<ActorState> {
        let player = ActorState::new(
            EntityId::PLAYER,
            Faction::Player,
            self.player.position,
            self.player.hit_points,
        );
        std::iter::once(player)
            .chain(self.enemies.iter().map(EnemySpec::to_actor))
            .collect()
    }

    fn validate(&self) -> LoadResult<()> {
        if self.player.hit_points == 0 {
            anyhow::bail!("Player must start with hit points");
        }

        let mut ids = HashSet::new();
        let mut cells = HashSet::from([self.player.position]);
        for enemy in &self.enemies {
            if EntityId(enemy.id).is_player() {
                anyhow::bail!("Enemy '{}' uses the reserved player id", enemy.display_name());
            }
            if !ids.insert(enemy.id) {
                anyhow::bail!("Duplicate enemy id {}", enemy.id);
            }
            if !cells.insert(enemy.position) {
                anyhow::bail!(
                    "Enemy '{}' spawns on occupied cell {}",
                    enemy.display_name(),
                    enemy.position
                );
            }
            if enemy.hit_points == 0 {
                anyhow::bail!("Enemy '{}' has no hit points", enemy.display_name());
            }
            // Deserialized abilities skip `Ability::new`, which clamps the range.
            if let Some(ability) = enemy.abilities.iter().find(|a| !(a.range >= 0.0)) {
                anyhow::bail!(
                    "Enemy '{}' ability '{}' has invalid range {}",
                    enemy.display_name(),
                    ability.name,
                    ability.range
                );
            }
        }
        Ok(())
    }
}

/// Loader for battle rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    pub fn load(path: &Path) -> LoadResult<RosterSpec> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<RosterSpec> {
        let roster: RosterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        roster.validate()?;
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"(
        player: (position: (col: 1, row: 1), hit_points: 50),
        enemies: [
            (id: 4, name: "Archer", position: (col: 3, row: 1), hit_points: 12,
             behavior: Kiting, attack_range: 150.0, safe_distance: 120.0,
             abilities: [(name: "arrow", damage: 6, range: 200.0)]),
            (id: 2, position: (col: 1, row: 3), hit_points: 8),
        ],
    )"#;

    #[test]
    fn parses_roster_with_optional_fields() {
        let roster = RosterLoader::parse(ROSTER).unwrap();
        assert_eq!(roster.enemies[0].display_name(), "Archer");
        assert_eq!(roster.enemies[1].display_name(), EntityId(2).to_string());

        let actors = roster.into_actors();
        assert_eq!(actors.len(), 3);
        assert_eq!(actors[0].id, EntityId::PLAYER);
        assert_eq!(actors[0].hit_points.maximum, 50);

        let archer = &actors[1];
        assert_eq!(archer.behavior, BehaviorMode::Kiting);
        assert_eq!(archer.attack_range, 150.0);
        assert_eq!(archer.abilities.first().name, "arrow");

        let grunt = &actors[2];
        assert_eq!(grunt.position(), HexCoord::new(1, 3));
        assert_eq!(grunt.behavior, BehaviorMode::Aggressive);
        assert_eq!(grunt.safe_distance, ActorState::DEFAULT_SAFE_DISTANCE);
        assert_eq!(grunt.abilities.first(), &Ability::basic_attack());
    }

    #[test]
    fn rejects_inconsistent_rosters() {
        let reserved = r#"(player: (position: (col: 0, row: 0), hit_points: 5),
            enemies: [(id: 0, position: (col: 1, row: 0), hit_points: 1)])"#;
        assert!(RosterLoader::parse(reserved).is_err());

        let duplicate = r#"(player: (position: (col: 0, row: 0), hit_points: 5),
            enemies: [
                (id: 1, position: (col: 1, row: 0), hit_points: 1),
                (id: 1, position: (col: 2, row: 0), hit_points: 1),
            ])"#;
        let err = RosterLoader::parse(duplicate).unwrap_err();
        assert!(err.to_string().contains("Duplicate enemy id 1"));

        let stacked = r#"(player: (position: (col: 0, row: 0), hit_points: 5),
            enemies: [(id: 1, position: (col: 0, row: 0), hit_points: 1)])"#;
        assert!(RosterLoader::parse(stacked).is_err());

        let negative_range = r#"(player: (position: (col: 0, row: 0), hit_points: 5),
            enemies: [(id: 1, position: (col: 1, row: 0), hit_points: 1,
                       abilities: [(name: "claw", damage: 2, range: -5.0)])])"#;
        let err = RosterLoader::parse(negative_range).unwrap_err();
        assert!(err.to_string().contains("'claw' has invalid range -5"));

        let nan_range = r#"(player: (position: (col: 0, row: 0), hit_points: 5),
            enemies: [(id: 1, position: (col: 1, row: 0), hit_points: 1,
                       abilities: [(name: "claw", damage: 2, range: NaN)])])"#;
        assert!(RosterLoader::parse(nan_range).is_err());
    }
}
