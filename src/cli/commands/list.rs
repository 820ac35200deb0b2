//! List command implementation
//!
//! This module implements the `list` command, which shows the collections
//! the configured source offers together with their document counts.

use crate::adapters::source::{DocumentSource, FilesystemSource};
use crate::config::load_config;
use crate::domain::CollectionInfo;
use crate::log_error_with_context;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print only collection keys, one per line
    #[arg(short, long)]
    pub quiet: bool,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let source = match FilesystemSource::open(&config.source.path).await {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Failed to open document source");
                eprintln!("Failed to open document source: {e}");
                return Ok(4);
            }
        };

        let collections = match source.list_collections().await {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to list collections");
                eprintln!("Failed to list collections: {e}");
                return Ok(4);
            }
        };

        if self.quiet {
            for info in &collections {
                println!("{}", info.key);
            }
            return Ok(0);
        }

        if collections.is_empty() {
            println!("No collections found in {}", source.root().display());
            return Ok(0);
        }

        println!("📚 Collections in {}:", source.root().display());
        println!();
        for info in &collections {
            let count = match source.resolve_collection(&info.key).await {
                Ok(Some(index)) => index.len().to_string(),
                Ok(None) => "-".to_string(),
                Err(e) => {
                    tracing::warn!(collection = %info.key, error = %e, "Failed to resolve collection");
                    "?".to_string()
                }
            };
            println!("{}", format_row(info, &count));
        }
        println!();

        Ok(0)
    }
}

fn format_row(info: &CollectionInfo, count: &str) -> String {
    format!("  {:<32} {:<16} {:>6} documents", info.key.as_str(), info.short_label(), count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CollectionKey;

    #[test]
    fn test_format_row_uses_short_label() {
        let info = CollectionInfo::new(
            CollectionKey::new("dnd5e.monsters").unwrap(),
            Some("Monsters of the Multiverse".to_string()),
        );
        let row = format_row(&info, "42");

        assert!(row.contains("dnd5e.monsters"));
        assert!(row.contains("Monsters of the "));
        assert!(!row.contains("Multiverse"));
        assert!(row.ends_with("42 documents"));
    }
}
