//! Archive writer abstraction

use crate::domain::Result;
use async_trait::async_trait;

/// Accumulates named entries for one batch and finalizes them into bytes
///
/// `finalize` consumes the writer, so it runs exactly once per instance and no
/// entry can be appended afterwards.
#[async_trait]
pub trait ArchiveWriter: Send {
    /// Add a named entry
    ///
    /// # Errors
    ///
    /// Returns [`QuireError::Archive`](crate::domain::QuireError::Archive) if
    /// the entry cannot be accepted (for example a duplicate name).
    fn append(&mut self, name: &str, content: Vec<u8>) -> Result<()>;

    /// Number of entries appended so far
    fn entry_count(&self) -> usize;

    /// Assemble the archive
    ///
    /// # Errors
    ///
    /// Returns an error if encoding the container fails.
    async fn finalize(self: Box<Self>) -> Result<Vec<u8>>;
}

/// Creates a fresh writer per batch
pub trait ArchiveFactory: Send + Sync {
    /// A new, empty writer
    fn create(&self) -> Box<dyn ArchiveWriter>;

    /// File extension of finalized archives, without the dot
    fn extension(&self) -> &'static str;
}
