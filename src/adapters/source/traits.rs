//! Document source abstraction
//!
//! The exporter only needs three things from the host store: what
//! collections exist, the ordered document index of one collection, and the
//! full document for an id.

use crate::domain::{CollectionIndex, CollectionInfo, CollectionKey, Document, DocumentId, Result};
use async_trait::async_trait;

/// Host document store
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Collections available for export, in presentation order
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be listed.
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>>;

    /// Resolve a collection key to its ordered document index
    ///
    /// Returns `Ok(None)` when the key does not name a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection exists but its index cannot be read.
    async fn resolve_collection(&self, key: &CollectionKey) -> Result<Option<CollectionIndex>>;

    /// Fetch one full document
    ///
    /// # Errors
    ///
    /// Returns [`QuireError::Fetch`](crate::domain::QuireError::Fetch) if the
    /// document cannot be loaded.
    async fn fetch_document(&self, key: &CollectionKey, id: &DocumentId) -> Result<Document>;
}
