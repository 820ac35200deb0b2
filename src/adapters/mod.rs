//! External system integrations for Quire.
//!
//! This module provides adapters for the three collaborators the exporter
//! talks to:
//!
//! - [`source`] - Document store access (trait-based, filesystem implementation)
//! - [`archive`] - Archive batch writers (trait-based, ZIP implementation)
//! - [`sink`] - Delivery of finalized archives (trait-based, directory implementation)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. The export coordinator only
//! sees the traits.
//!
//! ```rust,no_run
//! use quire::adapters::archive::ZipArchiveFactory;
//! use quire::adapters::sink::DirectorySink;
//! use quire::adapters::source::{DocumentSource, FilesystemSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = FilesystemSource::open("./collections").await?;
//! for collection in source.list_collections().await? {
//!     println!("{} ({})", collection.key, collection.short_label());
//! }
//!
//! let _archives = ZipArchiveFactory::new();
//! let _sink = DirectorySink::new("./exports");
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod sink;
pub mod source;
