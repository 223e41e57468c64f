//! Player skill catalog loader.

use std::collections::HashSet;
use std::path::Path;

use skirmish_core::{PlayerSkill, normalize_token};

use crate::loaders::{LoadResult, read_file};

/// Loader for player skills from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load the skill list from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<PlayerSkill>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Commands are matched case-insensitively, so names must stay unique after
    /// normalization.
    pub fn parse(content: &str) -> LoadResult<Vec<PlayerSkill>> {
        let skills: Vec<PlayerSkill> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skills RON: {}", e))?;

        let mut names = HashSet::new();
        for skill in &skills {
            let name = normalize_token(&skill.command_name);
            if name.is_empty() {
                anyhow::bail!("Skill with empty command name");
            }
            if !names.insert(name) {
                anyhow::bail!("Duplicate skill command '{}'", skill.command_name);
            }
        }
        Ok(skills)
    }
}
