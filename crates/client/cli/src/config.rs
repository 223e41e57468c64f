//! CLI runtime configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration required to bootstrap a battle in the terminal.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub content: ContentPaths,
    pub seed: Option<u64>,
    pub session_id: Option<String>,
    pub command_buffer: usize,
    /// Pause used to pace movement and attack lines.
    pub animation: Duration,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            content: ContentPaths::default(),
            seed: None,
            session_id: None,
            command_buffer: 32,
            animation: Duration::from_millis(150),
        }
    }
}

/// Optional content overrides. Anything unset uses the embedded data.
#[derive(Clone, Debug, Default)]
pub struct ContentPaths {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub roster: Option<PathBuf>,
    pub skills: Option<PathBuf>,
    pub map: Option<PathBuf>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_DATA_DIR` - Directory holding content overrides
    /// - `SKIRMISH_CONFIG` - Combat tunables TOML file
    /// - `SKIRMISH_ROSTER` - Roster RON file
    /// - `SKIRMISH_SKILLS` - Player skills RON file
    /// - `SKIRMISH_MAP` - Terrain RON file
    /// - `SKIRMISH_SEED` - Seed for enemy ability choice (default: random)
    /// - `SKIRMISH_SESSION_ID` - Log session identifier (default: auto-generated)
    /// - `SKIRMISH_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `SKIRMISH_ANIMATION_MS` - Pause per animation line (default: 150)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.content = ContentPaths {
            data_dir: read_path("SKIRMISH_DATA_DIR"),
            config: read_path("SKIRMISH_CONFIG"),
            roster: read_path("SKIRMISH_ROSTER"),
            skills: read_path("SKIRMISH_SKILLS"),
            map: read_path("SKIRMISH_MAP"),
        };

        config.seed = read_env::<u64>("SKIRMISH_SEED");
        config.session_id = env::var("SKIRMISH_SESSION_ID").ok();

        if let Some(capacity) = read_env::<usize>("SKIRMISH_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }
        if let Some(millis) = read_env::<u64>("SKIRMISH_ANIMATION_MS") {
            config.animation = Duration::from_millis(millis);
        }

        config
    }
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
