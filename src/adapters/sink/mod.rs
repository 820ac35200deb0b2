//! Batch sinks
//!
//! A [`BatchSink`] receives every finalized archive. [`DirectorySink`] writes
//! them to disk.

pub mod directory;
pub mod traits;

pub use directory::DirectorySink;
pub use traits::BatchSink;
