//! Domain models and types for Quire.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CollectionKey`], [`DocumentId`])
//! - **Domain models** ([`Document`], [`CollectionInfo`], [`CollectionIndex`])
//! - **Error types** ([`QuireError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Quire uses the newtype pattern for identifiers so a document id can never
//! be passed where a collection key is expected:
//!
//! ```rust
//! use quire::domain::{CollectionKey, DocumentId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let key = CollectionKey::new("dnd5e.items")?;
//! let id = DocumentId::new("0a1b2c3d")?;
//!
//! // This won't compile:
//! // let wrong: CollectionKey = id;
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod document;
pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use collection::{CollectionIndex, CollectionInfo};
pub use document::{Document, DocumentBuilder};
pub use errors::QuireError;
pub use ids::{CollectionKey, DocumentId};
pub use result::Result;
