//! Archive batch writers
//!
//! The exporter opens one [`ArchiveWriter`] per batch through an
//! [`ArchiveFactory`], appends entries, and finalizes it to bytes once.

pub mod traits;
pub mod zip;

pub use self::zip::{Compression, ZipArchiveFactory, ZipArchiveWriter};
pub use traits::{ArchiveFactory, ArchiveWriter};
