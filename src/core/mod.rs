//! Core business logic for Quire.
//!
//! # Modules
//!
//! - [`scrub`] - Markup conversion, readability classification, scrubbing and pruning
//! - [`export`] - Export orchestration, batch processing, and coordination
//!
//! # Export Workflow
//!
//! 1. **Resolve**: Look up each requested collection's document index
//! 2. **Fetch**: Load documents one at a time, in index order
//! 3. **Render**: Produce YAML, JSON and scrubbed TXT entries
//! 4. **Batch**: Pack entries into archives of at most `batch_size` documents
//! 5. **Deliver**: Finalize each full batch and hand it to the sink
//! 6. **Report**: Generate export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use quire::config::load_config;
//! use quire::core::export::ExportCoordinator;
//! use quire::domain::CollectionKey;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration
//! let config = load_config("quire.toml")?;
//!
//! // Create shutdown signal
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! // Create export coordinator
//! let coordinator = ExportCoordinator::from_config(&config, shutdown_rx).await?;
//!
//! // Execute export
//! let collections = vec![CollectionKey::new("dnd5e.items")?];
//! let summary = coordinator.execute_export(&collections).await?;
//!
//! println!("Documents: {}", summary.documents_exported);
//! println!("Archives: {}", summary.batches_finalized);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod scrub;
