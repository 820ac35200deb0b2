//! Directory sink: writes each archive into an output directory

use super::traits::BatchSink;
use crate::domain::{QuireError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes archives as files under a directory
///
/// In dry-run mode nothing is written; each delivery is only logged.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    output_dir: PathBuf,
    dry_run: bool,
}

impl DirectorySink {
    /// Sink writing into `output_dir`, created on first delivery
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dry_run: false,
        }
    }

    /// Toggle dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Target directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Whether deliveries are only logged
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

#[async_trait]
impl BatchSink for DirectorySink {
    async fn deliver(&self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.output_dir.join(file_name);

        if self.dry_run {
            tracing::info!(
                path = %path.display(),
                bytes = bytes.len(),
                "Dry run: skipping archive write"
            );
            return Ok(());
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                QuireError::Delivery(format!(
                    "cannot create {}: {e}",
                    self.output_dir.display()
                ))
            })?;

        let size = bytes.len();
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| QuireError::Delivery(format!("cannot write {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), bytes = size, "Archive written");
        Ok(())
    }
}
