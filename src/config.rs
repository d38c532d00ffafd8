use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Resolution bounds
// =============================================================================

/// Most versions ever retained per platform for one environment.
pub const DEFAULT_MAX_VERSIONS_PER_PLATFORM: usize = 5;

/// Most scraped links ever considered per environment.
pub const DEFAULT_MAX_LINKS_TO_PROCESS: usize = 150;

/// Upper bound on simultaneous in-flight liveness probes.
pub const DEFAULT_MAX_CONCURRENT_PROBES: usize = 16;

/// Per-request timeout for probes and page fetches, in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Overall deadline for resolving a single environment, in milliseconds.
pub const DEFAULT_ENVIRONMENT_TIMEOUT_MS: u64 = 120_000;

/// Bounds applied to a resolution run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Limits {
    pub max_versions_per_platform: usize,
    pub max_links_to_process: usize,
    pub max_concurrent_probes: usize,
    pub probe_timeout_ms: u64,
    pub environment_timeout_ms: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_versions_per_platform: DEFAULT_MAX_VERSIONS_PER_PLATFORM,
            max_links_to_process: DEFAULT_MAX_LINKS_TO_PROCESS,
            max_concurrent_probes: DEFAULT_MAX_CONCURRENT_PROBES,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            environment_timeout_ms: DEFAULT_ENVIRONMENT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Error)]
pub enum LimitsError {
    #[error("Failed to read limits file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse limits file: {0}")]
    Json(#[from] serde_json::Error),
}

impl Limits {
    /// Loads limits from a JSON file; absent fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, LimitsError> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn environment_timeout(&self) -> Duration {
        Duration::from_millis(self.environment_timeout_ms)
    }
}

/// Returns the path to the data directory for envrepo.
/// Uses $XDG_DATA_HOME/envrepo if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/envrepo,
/// or ./envrepo if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("envrepo.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("envrepo")
}
