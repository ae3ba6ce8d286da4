//! Config file discovery, loading, and environment variable overlay.

use crate::{ChordConfig, ConfigError};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Values set by one config file. Unset keys leave earlier layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub lower_limit: Option<u8>,
    pub upper_limit: Option<u8>,
    pub default_chord: Option<String>,
    pub spelling: Option<String>,
    pub log_level: Option<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided and exists, it replaces the local override.
/// Returns paths in load order (system, user, local/cli).
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/chordfinder/config.toml");
    if system.exists() {
        files.push(system);
    }

    // XDG_CONFIG_HOME or ~/.config
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("chordfinder/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    let local = PathBuf::from("chordfinder.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Load one config layer from a TOML file.
pub fn load_from_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_toml(&contents, path)
}

/// Parse one config layer from a TOML string.
pub fn parse_toml(contents: &str, path: &Path) -> Result<ConfigLayer, ConfigError> {
    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut layer = ConfigLayer::default();

    if let Some(engine) = table.get("engine").and_then(|v| v.as_table()) {
        layer.lower_limit = pitch_value(engine, "lower_limit", path)?;
        layer.upper_limit = pitch_value(engine, "upper_limit", path)?;
        if let Some(v) = engine.get("default_chord").and_then(|v| v.as_str()) {
            layer.default_chord = Some(v.to_string());
        }
        if let Some(v) = engine.get("spelling").and_then(|v| v.as_str()) {
            layer.spelling = Some(v.to_string());
        }
    }

    if let Some(telemetry) = table.get("telemetry").and_then(|v| v.as_table()) {
        if let Some(v) = telemetry.get("log_level").and_then(|v| v.as_str()) {
            layer.log_level = Some(v.to_string());
        }
    }

    Ok(layer)
}

/// A pitch limit in 0..=128.
fn pitch_value(table: &toml::Table, key: &str, path: &Path) -> Result<Option<u8>, ConfigError> {
    let Some(value) = table.get(key) else {
        return Ok(None);
    };
    value
        .as_integer()
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| *v <= 128)
        .map(Some)
        .ok_or_else(|| ConfigError::Parse {
            path: path.to_path_buf(),
            message: format!("engine.{} must be an integer between 0 and 128, got {}", key, value),
        })
}

/// Apply a layer on top of `config`.
pub fn merge_layer(config: &mut ChordConfig, layer: ConfigLayer) {
    if let Some(v) = layer.lower_limit {
        config.engine.lower_limit = v;
    }
    if let Some(v) = layer.upper_limit {
        config.engine.upper_limit = v;
    }
    if let Some(v) = layer.default_chord {
        config.engine.default_chord = v;
    }
    if let Some(v) = layer.spelling {
        config.engine.spelling = v;
    }
    if let Some(v) = layer.log_level {
        config.telemetry.log_level = v;
    }
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(config: &mut ChordConfig, sources: &mut ConfigSources) {
    apply_overrides_from(config, sources, |key| env::var(key).ok());
}

/// Apply overrides read through `lookup`. Unparseable limits are skipped.
pub fn apply_overrides_from<F>(config: &mut ChordConfig, sources: &mut ConfigSources, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("CHORDFINDER_LOWER_LIMIT") {
        if let Ok(limit) = v.trim().parse() {
            config.engine.lower_limit = limit;
            sources.env_overrides.push("CHORDFINDER_LOWER_LIMIT".to_string());
        }
    }
    if let Some(v) = lookup("CHORDFINDER_UPPER_LIMIT") {
        if let Ok(limit) = v.trim().parse() {
            config.engine.upper_limit = limit;
            sources.env_overrides.push("CHORDFINDER_UPPER_LIMIT".to_string());
        }
    }
    if let Some(v) = lookup("CHORDFINDER_DEFAULT_CHORD") {
        config.engine.default_chord = v;
        sources.env_overrides.push("CHORDFINDER_DEFAULT_CHORD".to_string());
    }
    if let Some(v) = lookup("CHORDFINDER_SPELLING") {
        config.engine.spelling = v;
        sources.env_overrides.push("CHORDFINDER_SPELLING".to_string());
    }

    if let Some(v) = lookup("CHORDFINDER_LOG_LEVEL") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("CHORDFINDER_LOG_LEVEL".to_string());
    }
    // RUST_LOG wins over the crate-specific variable
    if let Some(v) = lookup("RUST_LOG") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
}
