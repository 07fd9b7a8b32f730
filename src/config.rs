use std::path::{Path, PathBuf};

use anyhow::Context;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG: &str = std::include_str!("../config.default.toml");

lazy_static! {
    static ref DEFAULT: toml::Value =
        toml::from_str(DEFAULT_CONFIG).expect("bundled config.default.toml is valid TOML");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogLevel {
    level: log::LevelFilter,
}

impl From<log::LevelFilter> for LogLevel {
    fn from(level: log::LevelFilter) -> Self {
        Self { level }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        level.level
    }
}

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.level.to_string().to_lowercase())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let level = match s.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Off,
        };
        Ok(Self { level })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub roster: RosterConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub log_level: LogLevel,
    pub log_dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RosterConfig {
    pub path: PathBuf,
    pub require_selection: bool,
    pub strict: bool,
}

impl Config {
    /// Loads the config at `path` merged over the bundled defaults. A missing
    /// file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Self::from_value(DEFAULT.clone());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_str_merged(&contents)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    /// Parses `contents` and merges it over the bundled defaults.
    pub fn from_str_merged(contents: &str) -> anyhow::Result<Self> {
        let config: toml::Value = toml::from_str(contents)?;
        let merged = serde_toml_merge::merge(DEFAULT.clone(), config)
            .map_err(|e| anyhow::anyhow!("merging with defaults: {:?}", e))?;
        Self::from_value(merged)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, toml::to_string(self)?)
            .with_context(|| format!("writing config {}", path.display()))
    }

    fn from_value(value: toml::Value) -> anyhow::Result<Self> {
        Ok(value.try_into::<Config>()?)
    }
}
