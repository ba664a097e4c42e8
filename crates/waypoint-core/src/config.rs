use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Router settings loaded from `~/.config/waypoint/config.toml`.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Name given to the dedicated UI thread.
    pub ui_thread_name: String,
    /// Whether push/present animate when the caller does not say.
    pub default_animated: bool,
    /// Log registry misses (unregistered routes) at debug level.
    pub log_unresolved: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            ui_thread_name: "waypoint-ui".to_string(),
            default_animated: true,
            log_unresolved: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("waypoint")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the XDG config dir, writing the defaults there
/// first if no file exists yet.
pub fn load_or_init() -> Result<RouterConfig> {
    let path = config_path()?;
    if path.exists() {
        return load_from(&path);
    }
    let cfg = RouterConfig::default();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config dir {}", parent.display()))?;
    }
    fs::write(&path, toml::to_string_pretty(&cfg)?)
        .with_context(|| format!("writing default config {}", path.display()))?;
    tracing::info!("created default config at {}", path.display());
    Ok(cfg)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<RouterConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))
}
