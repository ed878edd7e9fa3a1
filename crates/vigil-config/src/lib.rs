//! Shared configuration for the vigil CLI.
//!
//! TOML file loading with environment overrides, plus translation to
//! `vigil_core::EngineConfig`. The CLI layers its own flag overrides
//! on top of what this crate resolves.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vigil_core::{
    DEFAULT_FLEET_SIZE, DEFAULT_JOURNAL_CAPACITY, DEFAULT_SIMULATOR_PERIOD, EngineConfig,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Presentation defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Engine tuning.
    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// Engine tuning knobs as they appear in the config file.
#[derive(Debug, Deserialize, Serialize)]
pub struct EngineSettings {
    /// Number of sites seeded at startup.
    #[serde(default = "default_fleet_size")]
    pub fleet_size: u32,

    /// Journal entries retained before eviction.
    #[serde(default = "default_journal_capacity")]
    pub journal_capacity: usize,

    /// Alarm simulator period in seconds.
    #[serde(default = "default_simulator_period_secs")]
    pub simulator_period_secs: u64,

    /// Fixed seed for reproducible fleets.
    pub seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fleet_size: default_fleet_size(),
            journal_capacity: default_journal_capacity(),
            simulator_period_secs: default_simulator_period_secs(),
            seed: None,
        }
    }
}

fn default_fleet_size() -> u32 {
    DEFAULT_FLEET_SIZE
}
fn default_journal_capacity() -> usize {
    DEFAULT_JOURNAL_CAPACITY
}
fn default_simulator_period_secs() -> u64 {
    DEFAULT_SIMULATOR_PERIOD.as_secs()
}

impl EngineSettings {
    /// Translate file settings into an [`EngineConfig`].
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        if self.fleet_size == 0 {
            return Err(ConfigError::Validation {
                field: "engine.fleet_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(EngineConfig {
            fleet_size: self.fleet_size,
            journal_capacity: self.journal_capacity,
            simulator_period: Duration::from_secs(self.simulator_period_secs),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "vigil", "vigil").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vigil");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from an explicit file + environment.
///
/// Env vars path with a double underscore so snake_case keys stay
/// addressable: `VIGIL_ENGINE__JOURNAL_CAPACITY` maps to
/// `engine.journal_capacity`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VIGIL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}
