use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "TODOS_DIR";
const APP_DIR: &str = "todos";
const LOCAL_FALLBACK_DIR: &str = ".todos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub user: UserConfig,
    pub data_dir: PathBuf,
}

/// Location of the user config file, if the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Read `<config_dir>/todos/config.toml`, defaulting when it is absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    match user_config_path() {
        Some(path) => load_user_config_from(&path),
        None => Ok(UserConfig::default()),
    }
}

/// Read a user config from an explicit path, defaulting when it is absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_user_config_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve config and data directory for this invocation.
///
/// # Errors
///
/// Propagates user config read/parse failures.
pub fn resolve_config(cli_dir: Option<&Path>) -> Result<EffectiveConfig> {
    let user = load_user_config()?;
    let env_dir = env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    let data_dir = resolve_data_dir(cli_dir, env_dir, &user, dirs::data_dir());

    Ok(EffectiveConfig { user, data_dir })
}

/// Data directory precedence: flag, `TODOS_DIR`, config `data_dir`, the
/// platform data dir, then `./.todos`.
#[must_use]
pub fn resolve_data_dir(
    cli_dir: Option<&Path>,
    env_dir: Option<PathBuf>,
    user: &UserConfig,
    platform_data_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = env_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        return dir;
    }
    if let Some(dir) = &user.data_dir {
        return dir.clone();
    }
    platform_data_dir.map_or_else(
        || PathBuf::from(LOCAL_FALLBACK_DIR),
        |dir| dir.join(APP_DIR),
    )
}

/// Canonical output mode name for a configured value.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        // canonical values
        "pretty" => Some("pretty"),
        "text" => Some("text"),
        "json" => Some("json"),
        // legacy compatibility
        "human" => Some("pretty"),
        "table" => Some("text"),
        _ => None,
    }
}
