//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Quire configuration file.

use crate::config::load_config;
use crate::core::export::ExportFormats;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        match config.validate() {
            Ok(()) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  Source Path: {}", config.source.path);
                println!("  Output Directory: {}", config.export.output_dir);
                println!("  Batch Size: {}", config.export.batch_size);
                println!("  Min Wait: {}ms", config.export.min_wait_ms);
                println!(
                    "  Formats: {}",
                    ExportFormats::from(&config.export.formats)
                );
                println!(
                    "  Collections: {}",
                    if config.export.collections.is_empty() {
                        "All".to_string()
                    } else {
                        config.export.collections.join(", ")
                    }
                );
                println!("  Dry Run: {}", config.export.dry_run);
                println!(
                    "  File Logging: {}",
                    if config.logging.local_enabled {
                        format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
                    } else {
                        "disabled".to_string()
                    }
                );
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}
