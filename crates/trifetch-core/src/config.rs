use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/trifetch/config.toml`.
///
/// Worker counts bound the parallelism of the pooled strategies; the
/// cooperative strategy schedules every task at once and needs no bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrifetchConfig {
    /// Worker threads for the threaded strategy.
    pub thread_workers: usize,
    /// Concurrent child processes for the multi-process strategy.
    pub process_workers: usize,
    /// Connect timeout for every fetch, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout for every fetch, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for TrifetchConfig {
    fn default() -> Self {
        Self {
            thread_workers: 8,
            process_workers: 4,
            connect_timeout_secs: 10,
            request_timeout_secs: 300,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("trifetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TrifetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TrifetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: TrifetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
