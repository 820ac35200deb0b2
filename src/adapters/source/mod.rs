//! Document sources
//!
//! [`DocumentSource`] is the seam between the exporter and whatever store
//! holds the documents. [`FilesystemSource`] is the bundled implementation.

pub mod filesystem;
pub mod traits;

pub use filesystem::FilesystemSource;
pub use traits::DocumentSource;
