//! Batch delivery abstraction

use crate::domain::Result;
use async_trait::async_trait;

/// Offers a finalized archive to the user
#[async_trait]
pub trait BatchSink: Send + Sync {
    /// Deliver one finalized archive under `file_name`
    ///
    /// # Errors
    ///
    /// Returns [`QuireError::Delivery`](crate::domain::QuireError::Delivery)
    /// if the archive cannot be handed over.
    async fn deliver(&self, file_name: &str, bytes: Vec<u8>) -> Result<()>;
}
