use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Statistics refresh cadence in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_window_width")]
    pub window_width: i32,
    #[serde(default = "default_window_height")]
    pub window_height: i32,
    /// Override for the statistics export directory.
    #[serde(default)]
    pub export_dir: Option<String>,
}

fn default_tick_interval_ms() -> u64 {
    100 // fast enough for a visibly running counter
}

fn default_window_width() -> i32 {
    420
}

fn default_window_height() -> i32 {
    560
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            export_dir: None,
        }
    }
}

impl Config {
    /// Validates config values after loading. Clamps out-of-range values
    /// and normalizes clearly invalid inputs.
    pub fn validate(&mut self) -> Result<()> {
        self.tick_interval_ms = self.tick_interval_ms.clamp(20, 1000);
        self.window_width = self.window_width.clamp(300, 3840);
        self.window_height = self.window_height.clamp(300, 2160);

        if let Some(dir) = &self.export_dir {
            if dir.trim().is_empty() {
                self.export_dir = None;
            }
        }

        Ok(())
    }

    /// Resolved export directory: the configured override, or the
    /// default under the local data dir.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(exports_dir)
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("talk-meter")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn exports_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("talk-meter")
        .join("exports")
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Не вдалося прочитати конфіг: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Не вдалося розпарсити конфіг")?;
    config.validate()?;
    Ok(config)
}
