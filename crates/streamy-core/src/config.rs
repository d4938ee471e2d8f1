use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::progress::StatsMode;
use crate::search::DEFAULT_CHUNK_SIZE;
use crate::units::BinaryUnit;

/// Global configuration loaded from `~/.config/streamy/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamyConfig {
    /// Read size for `find` and the copy loop, in bytes.
    pub chunk_size: usize,
    /// Rate estimation mode name ("simple").
    pub stats_mode: String,
    /// How often the CLI prints a progress line, in milliseconds.
    pub progress_interval_ms: u64,
    /// Unit applied to `--size` when the CLI gets no `--unit`.
    #[serde(default)]
    pub default_unit: BinaryUnit,
}

impl Default for StreamyConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            stats_mode: StatsMode::Simple.name().to_string(),
            progress_interval_ms: 500,
            default_unit: BinaryUnit::Byte,
        }
    }
}

impl StreamyConfig {
    /// Parsed stats mode; fails on an unknown name.
    pub fn stats_mode(&self) -> Result<StatsMode> {
        Ok(self.stats_mode.parse::<StatsMode>()?)
    }

    fn validate(&self) -> Result<()> {
        self.stats_mode()?;
        if self.progress_interval_ms == 0 {
            anyhow::bail!("progress_interval_ms must be greater than 0");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("streamy")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<StreamyConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<StreamyConfig> {
    if !path.exists() {
        let default_cfg = StreamyConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: StreamyConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}
