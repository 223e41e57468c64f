//! Content factory resolving battle content from a data directory.

use std::path::{Path, PathBuf};

use skirmish_core::{ActorState, CombatConfig, PlayerSkill, TerrainMap};
use tracing::debug;

use crate::embedded;
use crate::loaders::{ConfigLoader, LoadResult, RosterLoader, SkillLoader, TerrainLoader};

/// Resolves content files inside a data directory.
///
/// Files missing from the directory fall back to the embedded defaults, so a
/// directory only needs to contain what it overrides.
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const ROSTER_FILE: &'static str = "roster.ron";
    pub const SKILLS_FILE: &'static str = "skills.ron";
    pub const MAP_FILE: &'static str = "map.ron";

    /// Create a factory for a data directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: Some(data_dir.as_ref().to_path_buf()),
        }
    }

    /// Factory that only serves the embedded content.
    pub fn embedded() -> Self {
        Self { data_dir: None }
    }

    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        match self.existing(Self::CONFIG_FILE) {
            Some(path) => ConfigLoader::load(&path),
            None => embedded::config(),
        }
    }

    pub fn load_roster(&self) -> LoadResult<Vec<ActorState>> {
        match self.existing(Self::ROSTER_FILE) {
            Some(path) => RosterLoader::load(&path).map(|roster| roster.into_actors()),
            None => embedded::roster(),
        }
    }

    pub fn load_skills(&self) -> LoadResult<Vec<PlayerSkill>> {
        match self.existing(Self::SKILLS_FILE) {
            Some(path) => SkillLoader::load(&path),
            None => embedded::skills(),
        }
    }

    pub fn load_terrain(&self) -> LoadResult<TerrainMap> {
        match self.existing(Self::MAP_FILE) {
            Some(path) => TerrainLoader::load(&path),
            None => embedded::terrain(),
        }
    }

    fn existing(&self, file: &str) -> Option<PathBuf> {
        let path = self.data_dir.as_ref()?.join(file);
        if path.is_file() {
            debug!(target: "content", path = %path.display(), "Loading content file");
            Some(path)
        } else {
            None
        }
    }
}
