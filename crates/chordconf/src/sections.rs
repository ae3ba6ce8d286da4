//! Config sections.

use serde::{Deserialize, Serialize};

/// Settings handed to the chord engine at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSection {
    /// Lowest pitch that is tracked. Default: 0
    #[serde(default)]
    pub lower_limit: u8,

    /// Highest pitch that is tracked, 0 meaning unset. Default: 128
    #[serde(default = "EngineSection::default_upper_limit")]
    pub upper_limit: u8,

    /// Label shown when no notes sound. Default: empty
    #[serde(default)]
    pub default_chord: String,

    /// "flat" or "sharp". Default: flat
    #[serde(default = "EngineSection::default_spelling")]
    pub spelling: String,
}

impl EngineSection {
    fn default_upper_limit() -> u8 {
        128
    }

    fn default_spelling() -> String {
        "flat".to_string()
    }
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            lower_limit: 0,
            upper_limit: Self::default_upper_limit(),
            default_chord: String::new(),
            spelling: Self::default_spelling(),
        }
    }
}

/// Logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// `tracing` filter directive. Default: warn
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
