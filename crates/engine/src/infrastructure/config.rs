//! Engine configuration loaded from the environment.
//!
//! Variables (a `.env` file at the working directory or repo root is honoured):
//! - `CHARSHEET_DB` - SQLite database path, default `charsheet.db`
//! - `CHARSHEET_MAX_CONNECTIONS` - pool size, default 5

use std::path::Path;

pub const DB_PATH_VAR: &str = "CHARSHEET_DB";
pub const MAX_CONNECTIONS_VAR: &str = "CHARSHEET_MAX_CONNECTIONS";

const DEFAULT_DB_PATH: &str = "charsheet.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub db_path: String,
    pub max_connections: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Never fails; bad
    /// values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let db_path = lookup(DB_PATH_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.db_path);

        let max_connections = match lookup(MAX_CONNECTIONS_VAR) {
            None => defaults.max_connections,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = defaults.max_connections,
                        "Invalid {}, using default",
                        MAX_CONNECTIONS_VAR
                    );
                    defaults.max_connections
                }
            },
        };

        Self {
            db_path,
            max_connections,
        }
    }
}

/// Load `.env.local` / `.env` from the working directory, then the repo root.
/// Variables already set in the environment win.
pub fn load_dotenv() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for path in [
        Path::new(".env.local").to_path_buf(),
        Path::new(".env").to_path_buf(),
        repo_root.join(".env.local"),
        repo_root.join(".env"),
    ] {
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
