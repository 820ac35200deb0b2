//! ZIP archive writer
//!
//! Entries are buffered in memory and the container is built on a blocking
//! task at finalize, since the `zip` crate writes synchronously.

use super::traits::{ArchiveFactory, ArchiveWriter};
use crate::domain::{QuireError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use ::zip::write::FileOptions;
use ::zip::{CompressionMethod, ZipWriter};

/// Buffered writer for one ZIP batch
#[derive(Debug, Default)]
pub struct ZipArchiveWriter {
    compression: Compression,
    entries: Vec<(String, Vec<u8>)>,
    names: HashSet<String>,
}

/// Compression applied to every entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Deflate
    #[default]
    Deflated,
    /// No compression
    Stored,
}

impl Compression {
    fn method(self) -> CompressionMethod {
        match self {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        }
    }
}

impl ZipArchiveWriter {
    /// Empty writer using deflate
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty writer using the given compression
    pub fn with_compression(compression: Compression) -> Self {
        Self {
            compression,
            ..Self::default()
        }
    }

    fn build(compression: Compression, entries: Vec<(String, Vec<u8>)>) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(compression.method());

        for (name, content) in entries {
            writer.start_file(name, options)?;
            writer.write_all(&content)?;
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait]
impl ArchiveWriter for ZipArchiveWriter {
    fn append(&mut self, name: &str, content: Vec<u8>) -> Result<()> {
        if !self.names.insert(name.to_string()) {
            return Err(QuireError::Archive(format!("duplicate entry name: {name}")));
        }
        self.entries.push((name.to_string(), content));
        Ok(())
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    async fn finalize(self: Box<Self>) -> Result<Vec<u8>> {
        let ZipArchiveWriter {
            compression,
            entries,
            ..
        } = *self;

        tokio::task::spawn_blocking(move || Self::build(compression, entries))
            .await
            .map_err(|e| QuireError::Archive(format!("archive task failed: {e}")))?
    }
}

/// Factory for [`ZipArchiveWriter`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveFactory {
    compression: Compression,
}

impl ZipArchiveFactory {
    /// Factory producing deflate writers
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory producing writers with the given compression
    pub fn with_compression(compression: Compression) -> Self {
        Self { compression }
    }
}

impl ArchiveFactory for ZipArchiveFactory {
    fn create(&self) -> Box<dyn ArchiveWriter> {
        Box::new(ZipArchiveWriter::with_compression(self.compression))
    }

    fn extension(&self) -> &'static str {
        "zip"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_entries(bytes: Vec<u8>) -> Vec<(String, String)> {
        let mut archive = ::zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).unwrap();
            let mut content = String::new();
            file.read_to_string(&mut content).unwrap();
            out.push((file.name().to_string(), content));
        }
        out
    }

    #[tokio::test]
    async fn test_finalize_round_trips_entries_in_order() {
        let mut writer = ZipArchiveWriter::new();
        writer.append("b.yaml", b"name: B\n".to_vec()).unwrap();
        writer.append("a.txt", b"name: A".to_vec()).unwrap();
        assert_eq!(writer.entry_count(), 2);

        let bytes = Box::new(writer).finalize().await.unwrap();
        assert_eq!(
            read_entries(bytes),
            vec![
                ("b.yaml".to_string(), "name: B\n".to_string()),
                ("a.txt".to_string(), "name: A".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_stored_compression() {
        let factory = ZipArchiveFactory::with_compression(Compression::Stored);
        let mut writer = factory.create();
        writer.append("x.json", b"{}".to_vec()).unwrap();
        let bytes = writer.finalize().await.unwrap();
        assert_eq!(read_entries(bytes), vec![("x.json".to_string(), "{}".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_archive_is_valid() {
        let bytes = Box::new(ZipArchiveWriter::new()).finalize().await.unwrap();
        assert!(read_entries(bytes).is_empty());
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let mut writer = ZipArchiveWriter::new();
        writer.append("a.txt", Vec::new()).unwrap();
        let err = writer.append("a.txt", Vec::new()).unwrap_err();
        assert!(matches!(err, QuireError::Archive(_)));
    }

    #[test]
    fn test_factory_extension() {
        assert_eq!(ZipArchiveFactory::new().extension(), "zip");
    }
}
