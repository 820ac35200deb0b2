// Quire - Document Collection Exporter
// Copyright (c) 2025 Quire Contributors
// Licensed under the MIT License

//! # Quire - document collection exporter
//!
//! Quire exports collections of structured documents (game-system compendia,
//! item and spell databases) into batched ZIP archives, with each document
//! rendered as raw YAML, raw JSON and/or a scrubbed, human-readable text file.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Converting** HTML-bearing fields to plain text, with a regex fallback
//! - **Classifying** strings as readable prose or machine noise
//! - **Scrubbing** document trees of noise keys and values, then pruning empties
//! - **Batching** rendered documents into archives of at most `batch_size` documents
//!
//! ## Architecture
//!
//! Quire follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (scrub, export)
//! - [`adapters`] - Document source, archive writer and batch sink
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quire::config::load_config;
//! use quire::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("quire.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = ExportCoordinator::from_config(&config, shutdown_rx).await?;
//!     let collections = coordinator.select_collections(&config.export.collections).await?;
//!     let summary = coordinator.execute_export(&collections).await?;
//!
//!     println!("Exported {} documents", summary.documents_exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Scrubbing
//!
//! The TXT output keeps only what a person would want to read:
//!
//! ```rust
//! use quire::core::scrub::{ContentScrubber, ExclusionConfig};
//! use serde_json::json;
//!
//! let scrubber = ContentScrubber::new(ExclusionConfig::default());
//! let fields = json!({
//!     "_id": "a1b2c3",
//!     "name": "Longsword",
//!     "system": { "description": { "value": "<p>A versatile blade.</p>" } }
//! });
//!
//! let scrubbed = scrubber.scrub(fields.as_object().unwrap());
//! assert_eq!(
//!     serde_json::Value::Object(scrubbed),
//!     json!({ "name": "Longsword", "system": { "description": "A versatile blade." } })
//! );
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], whose error is
//! [`domain::QuireError`]. During an export, failures that only affect one
//! collection or one batch are recorded in the
//! [`core::export::ExportSummary`] instead of aborting the run.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
