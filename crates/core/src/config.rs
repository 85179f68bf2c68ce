use std::path::PathBuf;

pub const HOME_ENV: &str = "RUBYSCOPE_HOME";
pub const SNAPSHOT_ENV: &str = "RUBYSCOPE_SNAPSHOT";

const DEFAULT_DIR: &str = ".rubyscope";
const SNAPSHOT_FILE: &str = "builtin.snapshot";

/// Filesystem locations used by the indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home: PathBuf,
    pub snapshot_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Config {
    /// Resolve from `RUBYSCOPE_HOME` / `RUBYSCOPE_SNAPSHOT`, defaulting to `~/.rubyscope`.
    pub fn from_env() -> Self {
        let home = std::env::var_os(HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_home);
        let snapshot_path = std::env::var_os(SNAPSHOT_ENV).map(PathBuf::from);
        Self::with_home(home, snapshot_path)
    }

    pub fn with_home(home: PathBuf, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.unwrap_or_else(|| home.join(SNAPSHOT_FILE)),
            log_dir: home.join("logs"),
            home,
        }
    }

    pub fn with_snapshot_path(mut self, path: PathBuf) -> Self {
        self.snapshot_path = path;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_home(default_home(), None)
    }
}

fn default_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR)
}
