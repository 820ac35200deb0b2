//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::core::scrub::exclusion::{join_list, DEFAULT_EXCLUDED_KEYS, DEFAULT_EXCLUDED_SUBSTRINGS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "quire.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Quire configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point source.path at your collections directory");
                println!("  2. Validate configuration: quire validate-config");
                println!("  3. See what is available: quire list");
                println!("  4. Run export: quire export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Quire Configuration File

[application]
log_level = "info"

[source]
path = "./collections"

[export]
output_dir = "./exports"
batch_size = 100
min_wait_ms = 0
collections = []
dry_run = false

[export.formats]
yaml = true
json = false
txt = false

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with example values and comments
    fn generate_config_with_examples() -> String {
        format!(
            r#"# Quire Configuration File
# Exports document collections into batched ZIP archives
#
# Values may reference environment variables as ${{VAR_NAME}}, and any
# setting can be overridden with QUIRE_<SECTION>_<KEY>, for example
# QUIRE_EXPORT_BATCH_SIZE=50.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level: trace | debug | info | warn | error
# RUST_LOG takes precedence when set
log_level = "info"

# ============================================================================
# Document Source
# ============================================================================
[source]
# Root directory; every sub-directory is one collection.
# An optional collection.json inside it supplies "label" and "document_kind".
# Every other *.json file is one document.
path = "./collections"

# ============================================================================
# Export Settings
# ============================================================================
[export]
# Directory finalized archives are written to
output_dir = "./exports"

# Documents per archive (positive integer)
batch_size = 100

# Minimum delay between documents in milliseconds
min_wait_ms = 0

# Collection keys to export, in order; empty exports every collection
# collections = ["dnd5e.items", "dnd5e.spells"]
collections = []

# Build archives but only log where they would be written
dry_run = false

# At least one format must be enabled
[export.formats]
# Raw YAML dump of each document
yaml = true

# Raw pretty-printed JSON of each document
json = false

# Scrubbed human-readable text
txt = false

# ============================================================================
# TXT Scrubbing
# ============================================================================
[scrub]
# Field names dropped at every depth (comma-separated)
excluded_keys = "{keys}"

# Text containing any of these is dropped (comma-separated)
excluded_substrings = "{substrings}"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation: daily | hourly
local_rotation = "daily"
"#,
            keys = join_list(DEFAULT_EXCLUDED_KEYS),
            substrings = join_list(DEFAULT_EXCLUDED_SUBSTRINGS),
        )
    }
}
