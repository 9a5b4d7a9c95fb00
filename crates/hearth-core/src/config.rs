use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-level configuration, read from `<config-dir>/hearth/config.toml`.
///
/// A missing file is not an error; every field falls back to a default.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HearthConfig {
    /// Database file location. Overridden by `--db` and `HEARTH_DB`.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    /// Preferred output mode name ("pretty", "text", or "json").
    #[serde(default)]
    pub output: Option<String>,
}

/// Load the user config, returning defaults when no file exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config() -> Result<HearthConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(HearthConfig::default());
    };
    load_config_from(&config_dir.join("hearth/config.toml"))
}

fn load_config_from(path: &Path) -> Result<HearthConfig> {
    if !path.exists() {
        return Ok(HearthConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<HearthConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the database path. Precedence (highest wins):
/// 1. `--db` flag
/// 2. `HEARTH_DB` environment variable
/// 3. `db_path` from the user config
/// 4. `<data-dir>/hearth/hearth.db`, falling back to `./hearth.db`
#[must_use]
pub fn resolve_db_path(flag: Option<&Path>, config: &HearthConfig) -> PathBuf {
    resolve_db_path_inner(
        flag,
        std::env::var_os("HEARTH_DB").map(PathBuf::from),
        config,
        dirs::data_dir(),
    )
}

fn resolve_db_path_inner(
    flag: Option<&Path>,
    env_db: Option<PathBuf>,
    config: &HearthConfig,
    data_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Some(path) = env_db {
        return path;
    }
    if let Some(path) = &config.db_path {
        return path.clone();
    }
    data_dir.map_or_else(
        || PathBuf::from("hearth.db"),
        |dir| dir.join("hearth/hearth.db"),
    )
}

/// The advisory lock file guarding a store, next to the database file.
#[must_use]
pub fn lock_path_for(db_path: &Path) -> PathBuf {
    db_path.with_extension("lock")
}
