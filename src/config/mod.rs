//! Configuration management for Quire.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Quire uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `QUIRE_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation before any export starts
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use quire::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("quire.toml")?;
//!
//! println!("Source: {}", config.source.path);
//! println!("Batch size: {}", config.export.batch_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`SourceConfig`] - Where documents are read from
//! - [`ExportConfig`] - Batching, output directory, formats, selection
//! - [`ScrubConfig`] - Excluded keys and substrings for TXT output
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! path = "${QUIRE_DATA}/collections"
//!
//! [export]
//! output_dir = "./exports"
//! batch_size = 100
//! collections = ["dnd5e.items", "dnd5e.spells"]
//!
//! [export.formats]
//! yaml = true
//! txt = true
//!
//! [scrub]
//! excluded_keys = "_id, flags, img"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ExportConfig, FormatsConfig, LoggingConfig, QuireConfig, ScrubConfig,
    SourceConfig,
};
