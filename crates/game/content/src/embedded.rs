//! Default content compiled into the crate.

use skirmish_core::{ActorState, CombatConfig, PlayerSkill, TerrainMap};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader, SkillLoader, TerrainLoader};

pub const CONFIG: &str = include_str!("../data/config.toml");
pub const ROSTER: &str = include_str!("../data/roster.ron");
pub const SKILLS: &str = include_str!("../data/skills.ron");
pub const MAP: &str = include_str!("../data/map.ron");

pub fn config() -> LoadResult<CombatConfig> {
    ConfigLoader::parse(CONFIG)
}

pub fn roster() -> LoadResult<Vec<ActorState>> {
    RosterLoader::parse(ROSTER).map(|spec| spec.into_actors())
}

pub fn skills() -> LoadResult<Vec<PlayerSkill>> {
    SkillLoader::parse(SKILLS)
}

pub fn terrain() -> LoadResult<TerrainMap> {
    TerrainLoader::parse(MAP)
}

#[cfg(test)]
mod tests {
    use skirmish_core::{EntityId, Faction, TerrainOracle};

    use super::*;

    #[test]
    fn embedded_content_parses_and_fits_the_map() {
        assert_eq!(config().unwrap(), CombatConfig::default());

        let map = terrain().unwrap();
        let actors = roster().unwrap();
        assert_eq!(actors[0].id, EntityId::PLAYER);
        assert_eq!(actors[0].faction, Faction::Player);
        assert!(actors.len() > 1);
        for actor in &actors {
            assert!(
                map.is_walkable(actor.position()),
                "{} spawns on a blocked cell",
                actor.id
            );
        }

        let skills = skills().unwrap();
        assert!(skills.iter().any(|skill| skill.command_name == "ping"));
    }
}
