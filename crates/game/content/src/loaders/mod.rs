//! Content loaders for reading battle data from files.
//!
//! Every loader offers `load(path)` for files and `parse(text)` for in-memory
//! content such as the embedded defaults.

pub mod config;
pub mod factory;
pub mod roster;
pub mod skills;
pub mod terrain;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use roster::{EnemySpec, PlayerSpec, RosterLoader, RosterSpec};
pub use skills::SkillLoader;
pub use terrain::{MapSpec, TerrainLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
