//! User configuration.
//!
//! Settings are read from a JSON file. Lookup order:
//! 1. An explicit `--config <path>`
//! 2. `<config_dir>/neonbeats/config.json` (XDG-compatible, via `dirs`)
//! 3. Built-in defaults
//!
//! Every field is optional in the file; missing fields take their defaults.

use anyhow::{bail, Context, Result};
use neonbeats_audio::generate::{DEFAULT_CHANNELS, DEFAULT_DURATION_SECONDS, DEFAULT_SAMPLE_RATE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::history::DEFAULT_HISTORY_LIMIT;

/// Settings shared by all commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NeonConfig {
    /// Render sample rate in Hz.
    pub sample_rate: u32,
    /// Rendered channel count.
    pub channels: u16,
    /// Clip length used when `--duration` is not given.
    pub default_duration_seconds: u32,
    /// File name prefix for exported clips.
    pub file_prefix: String,
    /// Directory exported clips are written to.
    pub output_dir: PathBuf,
    /// History file location; defaults to the user data directory.
    pub history_path: Option<PathBuf>,
    /// Maximum number of history entries kept.
    pub history_limit: usize,
}

impl Default for NeonConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            default_duration_seconds: DEFAULT_DURATION_SECONDS,
            file_prefix: "neon-beats".to_string(),
            output_dir: PathBuf::from("."),
            history_path: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl NeonConfig {
    /// Default config file location (XDG-compatible).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("neonbeats").join("config.json"))
    }

    /// Loads configuration.
    ///
    /// An explicit path must exist. The default path is optional; when it is
    /// missing the built-in defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Reads and validates a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: NeonConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            bail!("sample_rate must be positive");
        }
        if self.channels == 0 {
            bail!("channels must be at least 1");
        }
        if self.default_duration_seconds == 0 {
            bail!("default_duration_seconds must be positive");
        }
        if self.file_prefix.trim().is_empty() {
            bail!("file_prefix must not be empty");
        }
        if self.history_limit == 0 {
            bail!("history_limit must be at least 1");
        }
        Ok(())
    }

    /// History file location, falling back to the user data directory.
    pub fn resolved_history_path(&self) -> Result<PathBuf> {
        match &self.history_path {
            Some(path) => Ok(path.clone()),
            None => crate::history::History::default_path()
                .context("Failed to determine history file location"),
        }
    }
}
