//! Export command implementation
//!
//! This module implements the `export` command, which packs the selected
//! collections into batched archives in the output directory.

use crate::config::{load_config, QuireConfig};
use crate::core::export::ExportCoordinator;
use crate::core::scrub::parse_list;
use crate::domain::QuireError;
use crate::log_error_with_context;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - build archives but do not write them
    #[arg(long)]
    pub dry_run: bool,

    /// Override collection key(s) to export (comma-separated)
    #[arg(long)]
    pub collections: Option<String>,

    /// Override documents per archive
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Override minimum delay between documents in milliseconds
    #[arg(long)]
    pub min_wait_ms: Option<u64>,

    /// Override output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Emit YAML entries (any format flag replaces the configured formats)
    #[arg(long)]
    pub yaml: bool,

    /// Emit JSON entries
    #[arg(long)]
    pub json: bool,

    /// Emit scrubbed TXT entries
    #[arg(long)]
    pub txt: bool,
}

impl ExportArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut QuireConfig) {
        if let Some(collections) = &self.collections {
            let keys = parse_list(collections);
            tracing::info!(collections = ?keys, "Overriding collections from CLI");
            config.export.collections = keys;
        }

        if let Some(batch_size) = self.batch_size {
            tracing::info!(batch_size, "Overriding batch size from CLI");
            config.export.batch_size = batch_size;
        }

        if let Some(min_wait_ms) = self.min_wait_ms {
            config.export.min_wait_ms = min_wait_ms;
        }

        if let Some(output_dir) = &self.output_dir {
            config.export.output_dir = output_dir.clone();
        }

        if self.yaml || self.json || self.txt {
            tracing::info!(
                yaml = self.yaml,
                json = self.json,
                txt = self.txt,
                "Overriding formats from CLI"
            );
            config.export.formats.yaml = self.yaml;
            config.export.formats.json = self.json;
            config.export.formats.txt = self.txt;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.export.dry_run = true;
        }
    }

    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.export.dry_run {
            tracing::info!("Dry run mode enabled - no archives will be written");
            println!("🔍 DRY RUN MODE - No archives will be written");
            println!();
        }

        let coordinator = match ExportCoordinator::from_config(&config, shutdown_signal).await {
            Ok(c) => c,
            Err(e @ QuireError::Configuration(_)) => {
                log_error_with_context!(&e, "Invalid export settings");
                eprintln!("Invalid export settings: {e}");
                return Ok(2);
            }
            Err(e) => {
                log_error_with_context!(&e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(4);
            }
        };

        let collections = match coordinator
            .select_collections(&config.export.collections)
            .await
        {
            Ok(keys) if keys.is_empty() => {
                eprintln!("No collections selected for export");
                return Ok(2);
            }
            Ok(keys) => keys,
            Err(e @ QuireError::Configuration(_)) => {
                eprintln!("Invalid collection selection: {e}");
                return Ok(2);
            }
            Err(e) => {
                log_error_with_context!(&e, "Failed to list collections");
                eprintln!("Failed to list collections: {e}");
                return Ok(4);
            }
        };

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !config.export.dry_run {
            println!("Export Configuration:");
            println!("  Source: {}", config.source.path);
            println!("  Output: {}", config.export.output_dir);
            println!(
                "  Collections: {}",
                collections
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("  Batch size: {}", config.export.batch_size);
            println!("  Formats: {}", coordinator.batch_config().formats);
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.execute_export(&collections).await {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        println!();
        println!("📊 Export Summary:");
        println!("  Collections requested: {}", summary.collections_requested);
        println!("  Collections completed: {}", summary.collections_completed);
        println!("  Collections skipped: {}", summary.collections_skipped);
        println!("  Collections failed: {}", summary.collections_failed);
        println!("  Documents exported: {}", summary.documents_exported);
        println!("  Archives written: {}", summary.batches_finalized);
        println!("  Archives failed: {}", summary.batches_failed);
        if let Some(started_at) = summary.started_at {
            println!("  Started: {}", started_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        if !summary.archives.is_empty() {
            println!("📦 Archives:");
            for archive in &summary.archives {
                println!("  - {archive}");
            }
            println!();
        }

        if !summary.warnings.is_empty() {
            println!("ℹ️  Warnings:");
            for warning in &summary.warnings {
                println!("  - {warning}");
            }
            println!();
        }

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {:?}: {}", error.error_type, error.message);
                if let Some(context) = &error.context {
                    println!("    Context: {context}");
                }
            }
            println!();
        }

        let exit_code = if summary.interrupted {
            println!("⚠️  Export interrupted. The batch in progress was discarded.");
            tracing::info!("Export interrupted by user signal");
            130
        } else if summary.is_successful() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with errors");
            1
        };

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ExportArgs {
        ExportArgs {
            yes: false,
            dry_run: false,
            collections: None,
            batch_size: None,
            min_wait_ms: None,
            output_dir: None,
            yaml: false,
            json: false,
            txt: false,
        }
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = QuireConfig::default();
        args().apply_overrides(&mut config);

        assert_eq!(config.export.batch_size, 100);
        assert!(config.export.formats.yaml);
        assert!(!config.export.formats.txt);
        assert!(!config.export.dry_run);
        assert!(config.export.collections.is_empty());
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = QuireConfig::default();
        let args = ExportArgs {
            dry_run: true,
            collections: Some("dnd5e.items, ,dnd5e.spells".to_string()),
            batch_size: Some(10),
            min_wait_ms: Some(50),
            output_dir: Some("/tmp/out".to_string()),
            json: true,
            txt: true,
            ..args()
        };
        args.apply_overrides(&mut config);

        assert_eq!(config.export.collections, vec!["dnd5e.items", "dnd5e.spells"]);
        assert_eq!(config.export.batch_size, 10);
        assert_eq!(config.export.min_wait_ms, 50);
        assert_eq!(config.export.output_dir, "/tmp/out");
        assert!(!config.export.formats.yaml);
        assert!(config.export.formats.json);
        assert!(config.export.formats.txt);
        assert!(config.export.dry_run);
    }

    #[test]
    fn test_zero_batch_size_override_fails_validation() {
        let mut config = QuireConfig::default();
        let args = ExportArgs {
            batch_size: Some(0),
            ..args()
        };
        args.apply_overrides(&mut config);
        assert!(config.validate().is_err());
    }
}
