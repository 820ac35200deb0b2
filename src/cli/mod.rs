//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Quire using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Quire - document collection exporter
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(version, about, long_about = None)]
#[command(author = "Quire Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "quire.toml", env = "QUIRE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "QUIRE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export collections into batched archives
    Export(commands::export::ExportArgs),

    /// List the collections available in the source
    List(commands::list::ListArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["quire", "export"]);
        assert_eq!(cli.config, "quire.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["quire", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["quire", "--log-level", "debug", "list"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_cli_parse_export_overrides() {
        let cli = Cli::parse_from([
            "quire",
            "export",
            "--collections",
            "dnd5e.items,dnd5e.spells",
            "--batch-size",
            "25",
            "--txt",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.collections.as_deref(), Some("dnd5e.items,dnd5e.spells"));
                assert_eq!(args.batch_size, Some(25));
                assert!(args.txt);
                assert!(!args.json);
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["quire", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["quire", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
