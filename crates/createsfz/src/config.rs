//! Configuration file support for createsfz
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/createsfz/config.toml`
//! - macOS: `~/Library/Application Support/createsfz/config.toml`
//! - Windows: `%APPDATA%\createsfz\config.toml`
//!
//! Every value can be overridden on the command line.

use crate::emit::MAX_VELOCITY_LAYERS;
use crate::error::{Error, Result};
use crate::format::FilenameFormat;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for the build command
    pub defaults: Defaults,
    /// Velocity layer name overrides
    pub velocities: VelocitySettings,
}

impl Config {
    /// Load configuration from the default config file location
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Err(Error::Config(format!("Config file not found at {:?}", path)))
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.velocities.validate()?;
        Ok(config)
    }

    /// Load configuration or return default if not found
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(Error::Config(msg)) => {
                log::debug!("{}, using defaults", msg);
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the given path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "createsfz") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            Err(Error::Config("Could not determine config directory".to_string()))
        }
    }

    /// Create a default config file with comments
    pub fn create_default_config_file() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, DEFAULT_CONFIG_FILE)?;
        Ok(path)
    }

    /// The configured default format, if any
    pub fn default_format(&self) -> Result<Option<FilenameFormat>> {
        self.defaults
            .format
            .as_deref()
            .map(str::parse)
            .transpose()
    }
}

const DEFAULT_CONFIG_FILE: &str = r#"# createsfz configuration file

[defaults]
# Sample name format: "format1", "format2" or "pianobook".
# Leave unset to pick the format that recognizes the most files.
# format = "format1"

# Extend the lowest note's key range this many keys downwards
key_range_low = 0

# Volume (dB) applied to release trigger regions, 0 to leave unchanged
release_volume = 0.0

# Replace existing output files
allow_overwrite = false

# Root note for sequential mapping (used with --root-note style builds)
# root_note = "C3"

[velocities]
# Velocity layer names, softest first. A sample whose name is not in the
# list gets no velocity range.
# format1 = ["Soft", "Medium", "Hard"]
# pianobook = ["pp", "p", "mp", "mf", "f", "ff"]
"#;

/// Defaults for the build command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Sample name format; probe when unset
    pub format: Option<String>,
    /// Key range expansion below the lowest note
    pub key_range_low: u8,
    /// Release trigger volume in dB
    pub release_volume: f32,
    /// Replace existing output files
    pub allow_overwrite: bool,
    /// Root note for sequential mapping
    pub root_note: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            format: None,
            key_range_low: 0,
            release_volume: 0.0,
            allow_overwrite: false,
            root_note: None,
        }
    }
}

/// Velocity layer names per format, softest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocitySettings {
    /// Names for `format1`
    pub format1: Option<Vec<String>>,
    /// Names for `pianobook`
    pub pianobook: Option<Vec<String>>,
}

impl VelocitySettings {
    /// Velocity names to use for a format, falling back to its built-in list
    pub fn for_format(&self, format: FilenameFormat) -> Vec<String> {
        let configured = match format {
            FilenameFormat::Format1 => self.format1.as_ref(),
            FilenameFormat::Format2 => None,
            FilenameFormat::PianoBook => self.pianobook.as_ref(),
        };
        match configured {
            Some(names) => names.clone(),
            None => format
                .default_velocities()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Check that no list has more names than there are velocity layers
    pub fn validate(&self) -> Result<()> {
        let lists = [("format1", &self.format1), ("pianobook", &self.pianobook)];
        for (format, names) in lists {
            if let Some(names) = names {
                if names.len() > MAX_VELOCITY_LAYERS {
                    return Err(Error::Config(format!(
                        "{} velocity list has {} names, at most {} are allowed",
                        format,
                        names.len(),
                        MAX_VELOCITY_LAYERS
                    )));
                }
            }
        }
        Ok(())
    }
}
