//! Configuration loading for the chord finder.
//!
//! # Usage
//!
//! ```rust,no_run
//! use chordconf::ChordConfig;
//!
//! let config = ChordConfig::load().expect("Failed to load config");
//! println!("tracking pitches {}..={}", config.engine.lower_limit, config.engine.upper_limit);
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/chordfinder/config.toml` (system)
//! 2. `~/.config/chordfinder/config.toml` (user)
//! 3. `./chordfinder.toml` (local override, or the path given to [`ChordConfig::load_from`])
//! 4. Environment variables (`CHORDFINDER_*`, `RUST_LOG`)
//!
//! # Example Config
//!
//! ```toml
//! [engine]
//! lower_limit = 36
//! upper_limit = 96
//! default_chord = "N.C."
//! spelling = "flat"
//!
//! [telemetry]
//! log_level = "info"
//! ```

pub mod loader;
pub mod sections;

pub use loader::{discover_config_files_with_override, ConfigLayer, ConfigSources};
pub use sections::{EngineSection, TelemetryConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Complete chord finder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChordConfig {
    #[serde(default)]
    pub engine: EngineSection,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl ChordConfig {
    /// Load configuration from all sources.
    ///
    /// Load order (later wins):
    /// 1. Compiled defaults
    /// 2. `/etc/chordfinder/config.toml`
    /// 3. `~/.config/chordfinder/config.toml`
    /// 4. `./chordfinder.toml`
    /// 5. Environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration with an explicit file in place of `./chordfinder.toml`.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration and return information about sources.
    pub fn load_with_sources() -> Result<(Self, ConfigSources), ConfigError> {
        Self::load_with_sources_from(None)
    }

    /// Load configuration from optional path and return information about sources.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::FileRead {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                });
            }
        }

        let mut sources = ConfigSources::default();
        let mut config = ChordConfig::default();

        for path in loader::discover_config_files_with_override(config_path) {
            let layer = loader::load_from_file(&path)?;
            loader::merge_layer(&mut config, layer);
            sources.files.push(path);
        }

        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        let mut output = String::new();

        output.push_str("# Chord finder configuration\n\n");

        output.push_str("[engine]\n");
        output.push_str(&format!("lower_limit = {}\n", self.engine.lower_limit));
        output.push_str(&format!("upper_limit = {}\n", self.engine.upper_limit));
        output.push_str(&format!(
            "default_chord = {}\n",
            toml::Value::String(self.engine.default_chord.clone())
        ));
        output.push_str(&format!(
            "spelling = {}\n",
            toml::Value::String(self.engine.spelling.clone())
        ));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!(
            "log_level = {}\n",
            toml::Value::String(self.telemetry.log_level.clone())
        ));

        output
    }
}
