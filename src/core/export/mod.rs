//! Export orchestration and batch processing
//!
//! This module provides the core export logic for Quire, including:
//! - Export coordination and orchestration
//! - Batching of rendered documents into archives
//! - Output format rendering and file naming
//! - Summary and reporting

pub mod batch;
pub mod coordinator;
pub mod formats;
pub mod naming;
pub mod summary;

pub use batch::{BatchConfig, ExportBatch, DEFAULT_BATCH_SIZE};
pub use coordinator::ExportCoordinator;
pub use formats::{Entry, EntryRenderer, ExportFormats, OutputFormat};
pub use naming::{archive_file_name, entry_stem, sanitize_filename_part};
pub use summary::{ExportError, ExportErrorType, ExportSummary};
