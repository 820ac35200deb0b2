//! Batch configuration and the in-progress batch
//!
//! A batch holds at most `batch_size` documents' worth of entries in one
//! archive writer. It is created empty, filled document by document, and
//! finalized exactly once.

use crate::adapters::archive::ArchiveWriter;
use crate::config::schema::ExportConfig;
use crate::core::export::formats::{Entry, ExportFormats};
use crate::domain::{QuireError, Result};
use std::time::Duration;

/// Documents per batch when not configured
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Run-time batching policy, frozen at run start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Documents per archive (not entries)
    pub batch_size: usize,
    /// Formats rendered for each document
    pub formats: ExportFormats,
    /// Minimum delay between documents
    pub min_wait: Duration,
}

impl BatchConfig {
    /// Create a validated batch configuration
    ///
    /// # Errors
    ///
    /// Returns [`QuireError::Configuration`] if `batch_size` is zero or no
    /// format is enabled.
    pub fn new(batch_size: usize, formats: ExportFormats, min_wait: Duration) -> Result<Self> {
        if batch_size < 1 {
            return Err(QuireError::Configuration(
                "Batch size must be a positive integer".to_string(),
            ));
        }

        if !formats.any() {
            return Err(QuireError::Configuration(
                "At least one export format (yaml, json, txt) must be enabled".to_string(),
            ));
        }

        Ok(Self {
            batch_size,
            formats,
            min_wait,
        })
    }

    /// Create from the `[export]` configuration section
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        Self::new(
            config.batch_size,
            ExportFormats::from(&config.formats),
            Duration::from_millis(config.min_wait_ms),
        )
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            formats: ExportFormats::default(),
            min_wait: Duration::ZERO,
        }
    }
}

/// The batch currently being filled for one collection
pub struct ExportBatch {
    number: u32,
    writer: Box<dyn ArchiveWriter>,
    document_count: usize,
}

impl ExportBatch {
    /// Empty batch with a 1-based number
    pub fn new(number: u32, writer: Box<dyn ArchiveWriter>) -> Self {
        Self {
            number,
            writer,
            document_count: 0,
        }
    }

    /// Batch number within its collection
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Documents added so far
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Entries added so far
    pub fn entry_count(&self) -> usize {
        self.writer.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.document_count == 0
    }

    /// Whether the batch has reached `batch_size` documents
    pub fn is_full(&self, batch_size: usize) -> bool {
        self.document_count >= batch_size
    }

    /// Append all of one document's entries
    ///
    /// # Errors
    ///
    /// Returns an error if the writer rejects an entry.
    pub fn add_document(&mut self, entries: Vec<Entry>) -> Result<()> {
        for entry in entries {
            self.writer.append(&entry.name, entry.content)?;
        }
        self.document_count += 1;
        Ok(())
    }

    /// Finalize into archive bytes, consuming the batch
    pub async fn finalize(self) -> Result<Vec<u8>> {
        self.writer.finalize().await
    }
}

impl std::fmt::Debug for ExportBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportBatch")
            .field("number", &self.number)
            .field("document_count", &self.document_count)
            .field("entry_count", &self.writer.entry_count())
            .finish()
    }
}
