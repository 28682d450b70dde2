use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::lists::{self, Blocklist, Favorites};
use crate::Direction;

/// Environment variables set by the launcher
pub const ENV_INPUTS: &str = "inputs";
pub const ENV_OUTPUTS: &str = "outputs";
pub const ENV_IGNORELIST: &str = "ignorelist";
pub const ENV_SYNC_SOUND_EFFECTS: &str = "sync_sound_effects_output";
pub const ENV_SOUND_EFFECTS_FAILURE: &str = "sound_effects_failure";

/// Error types for configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// What to do when mirroring the output switch onto the sound-effects device fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffectsPolicy {
    /// Fail the whole command.
    #[default]
    Abort,
    /// Log and report the primary switch as successful.
    #[serde(rename = "ignore", alias = "best_effort")]
    BestEffort,
}

impl FromStr for SoundEffectsPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "abort" => Ok(SoundEffectsPolicy::Abort),
            "ignore" | "best_effort" => Ok(SoundEffectsPolicy::BestEffort),
            other => Err(ConfigError::InvalidValue {
                key: ENV_SOUND_EFFECTS_FAILURE.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Boolean environment value; unset-looking values ("" or "0") are false.
fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// On-disk layout of `audio-switch.toml`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct FileConfig {
    inputs: Vec<String>,
    outputs: Vec<String>,
    ignorelist: Vec<String>,
    sync_sound_effects_output: bool,
    sound_effects_failure: SoundEffectsPolicy,
}

/// Resolved configuration for one invocation
#[derive(Debug, Clone, Default)]
pub struct SwitcherConfig {
    pub input_favorites: Favorites,
    pub output_favorites: Favorites,
    pub blocklist: Blocklist,
    pub sync_sound_effects_output: bool,
    pub sound_effects_policy: SoundEffectsPolicy,
}

impl SwitcherConfig {
    /// Load the config file (if any) and apply environment overrides.
    ///
    /// `path` falls back to [`default_config_path`]; a missing file is not an error.
    pub fn load<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        let file = Self::load_from_file(&path)?;
        Self::from_sources(file, env)
    }

    fn load_from_file(path: &Path) -> Result<FileConfig, ConfigError> {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(FileConfig::default());
        }

        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }

    fn from_sources<F>(file: FileConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input_favorites = match env(ENV_INPUTS) {
            Some(raw) => lists::parse_favorites(&raw),
            None => lists::parse_favorites(&file.inputs.join("\n")),
        };
        let output_favorites = match env(ENV_OUTPUTS) {
            Some(raw) => lists::parse_favorites(&raw),
            None => lists::parse_favorites(&file.outputs.join("\n")),
        };
        let blocklist = match env(ENV_IGNORELIST) {
            Some(raw) => Blocklist::parse(&raw),
            None => file.ignorelist.into_iter().collect(),
        };
        let sync_sound_effects_output = match env(ENV_SYNC_SOUND_EFFECTS) {
            Some(raw) => parse_flag(ENV_SYNC_SOUND_EFFECTS, &raw)?,
            None => file.sync_sound_effects_output,
        };
        let sound_effects_policy = match env(ENV_SOUND_EFFECTS_FAILURE) {
            Some(raw) => raw.parse()?,
            None => file.sound_effects_failure,
        };

        Ok(Self {
            input_favorites,
            output_favorites,
            blocklist,
            sync_sound_effects_output,
            sound_effects_policy,
        })
    }

    pub fn favorites(&self, direction: Direction) -> &Favorites {
        match direction {
            Direction::Input => &self.input_favorites,
            Direction::Output => &self.output_favorites,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("xfce-rs")
        .join("audio-switch.toml")
}
