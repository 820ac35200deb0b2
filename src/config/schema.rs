//! Configuration schema types
//!
//! This module defines the configuration structure for Quire.

use crate::core::scrub::exclusion::{join_list, DEFAULT_EXCLUDED_KEYS, DEFAULT_EXCLUDED_SUBSTRINGS};
use serde::{Deserialize, Serialize};

/// Main Quire configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuireConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Document source settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// TXT scrubbing settings
    #[serde(default)]
    pub scrub: ScrubConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl QuireConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Document source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Root directory of the filesystem document store
    #[serde(default = "default_source_path")]
    pub path: String,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("source.path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_source_path(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory finalized archives are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Documents per archive batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Minimum delay between documents in milliseconds
    #[serde(default)]
    pub min_wait_ms: u64,

    /// Collection keys to export; empty means every listed collection
    #[serde(default)]
    pub collections: Vec<String>,

    /// Dry run mode - build archives but only log where they would be written
    #[serde(default)]
    pub dry_run: bool,

    /// Output format toggles
    #[serde(default)]
    pub formats: FormatsConfig,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.batch_size < 1 {
            return Err(format!(
                "export.batch_size must be a positive integer, got {}",
                self.batch_size
            ));
        }

        if !self.formats.any() {
            return Err(
                "At least one of export.formats.yaml, json or txt must be enabled".to_string(),
            );
        }

        if self.collections.iter().any(|key| key.trim().is_empty()) {
            return Err("export.collections cannot contain empty keys".to_string());
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            batch_size: default_batch_size(),
            min_wait_ms: 0,
            collections: Vec::new(),
            dry_run: false,
            formats: FormatsConfig::default(),
        }
    }
}

/// Output format toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatsConfig {
    /// Raw YAML dump of each document
    #[serde(default = "default_true")]
    pub yaml: bool,

    /// Raw JSON dump of each document
    #[serde(default)]
    pub json: bool,

    /// Scrubbed human-readable text
    #[serde(default)]
    pub txt: bool,
}

impl FormatsConfig {
    /// Whether at least one format is enabled
    pub fn any(&self) -> bool {
        self.yaml || self.json || self.txt
    }
}

impl Default for FormatsConfig {
    fn default() -> Self {
        Self {
            yaml: true,
            json: false,
            txt: false,
        }
    }
}

/// TXT scrubbing configuration
///
/// Both lists are comma-separated; entries are trimmed and blanks dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrubConfig {
    /// Field names dropped at every depth
    #[serde(default = "default_excluded_keys")]
    pub excluded_keys: String,

    /// Substrings that disqualify converted text
    #[serde(default = "default_excluded_substrings")]
    pub excluded_substrings: String,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            excluded_keys: default_excluded_keys(),
            excluded_substrings: default_excluded_substrings(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_source_path() -> String {
    "./collections".to_string()
}

fn default_output_dir() -> String {
    "./exports".to_string()
}

fn default_batch_size() -> usize {
    crate::core::export::batch::DEFAULT_BATCH_SIZE
}

fn default_excluded_keys() -> String {
    join_list(DEFAULT_EXCLUDED_KEYS)
}

fn default_excluded_substrings() -> String {
    join_list(DEFAULT_EXCLUDED_SUBSTRINGS)
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
