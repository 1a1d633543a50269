use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Global configuration loaded from `~/.config/ttrd/config.toml`.
///
/// Engine tuning only. Credentials are never configuration; they are prompted
/// for at each run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtrdConfig {
    /// Total timeout in seconds for each login request (page GET and signin POST).
    pub login_timeout_secs: u64,
    /// Total timeout in seconds for each report GET.
    pub report_timeout_secs: u64,
    /// Filename of the bundled zip written next to the individual PDFs.
    pub archive_name: String,
}

impl Default for TtrdConfig {
    fn default() -> Self {
        Self {
            login_timeout_secs: 15,
            report_timeout_secs: 20,
            archive_name: "all_reports.zip".to_string(),
        }
    }
}

impl TtrdConfig {
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    pub fn report_timeout(&self) -> Duration {
        Duration::from_secs(self.report_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ttrd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TtrdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TtrdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: TtrdConfig = toml::from_str(&data)?;
    Ok(cfg)
}
