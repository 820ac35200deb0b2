//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::QuireError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Summary of an export operation
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Number of collections requested
    pub collections_requested: usize,

    /// Collections whose documents were all processed
    pub collections_completed: usize,

    /// Collections skipped because they were unknown or empty
    pub collections_skipped: usize,

    /// Collections aborted by a fetch or serialization error
    pub collections_failed: usize,

    /// Documents contained in delivered archives
    pub documents_exported: usize,

    /// Archives finalized and delivered
    pub batches_finalized: usize,

    /// Batches lost to finalize or delivery errors
    pub batches_failed: usize,

    /// Whether the run was halted by a shutdown request
    pub interrupted: bool,

    /// Wall-clock start of the run
    pub started_at: Option<DateTime<Utc>>,

    /// Duration of the export
    pub duration: Duration,

    /// File names of delivered archives, in delivery order
    pub archives: Vec<String>,

    /// Non-fatal problems that skipped a collection
    pub warnings: Vec<ExportError>,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ExportError) {
        self.warnings.push(warning);
    }

    /// Record a delivered archive
    pub fn record_delivery(&mut self, file_name: String, documents: usize) {
        self.batches_finalized += 1;
        self.documents_exported += documents;
        self.archives.push(file_name);
    }

    /// Check if the export was successful (no errors, not interrupted)
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty() && !self.interrupted
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            collections_requested = self.collections_requested,
            collections_completed = self.collections_completed,
            collections_skipped = self.collections_skipped,
            collections_failed = self.collections_failed,
            documents_exported = self.documents_exported,
            batches_finalized = self.batches_finalized,
            batches_failed = self.batches_failed,
            interrupted = self.interrupted,
            started_at = ?self.started_at.map(|t| t.to_rfc3339()),
            duration_secs = self.duration.as_secs(),
            "Export completed"
        );

        for warning in &self.warnings {
            tracing::warn!(
                error_type = ?warning.error_type,
                message = %warning.message,
                context = warning.context.as_deref().unwrap_or(""),
                "Export warning"
            );
        }

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Run rejected before it started
    Configuration,
    /// Collection key unknown, or its index unreadable
    Resolution,
    /// A document could not be fetched
    Fetch,
    /// A document could not be rendered
    Serialization,
    /// An entry could not be added to the archive
    Archive,
    /// A batch could not be assembled into an archive
    Finalize,
    /// A finished archive could not be delivered
    Delivery,
}

impl From<&QuireError> for ExportErrorType {
    fn from(err: &QuireError) -> Self {
        match err {
            QuireError::Configuration(_) => ExportErrorType::Configuration,
            QuireError::Fetch { .. } => ExportErrorType::Fetch,
            QuireError::Serialization(_) => ExportErrorType::Serialization,
            QuireError::Archive(_) => ExportErrorType::Archive,
            QuireError::Delivery(_) => ExportErrorType::Delivery,
            QuireError::Resolution(_)
            | QuireError::Source(_)
            | QuireError::Io(_)
            | QuireError::Other(_) => ExportErrorType::Resolution,
        }
    }
}

/// Export error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., collection key, batch number)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{} ({context})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert_eq!(summary.collections_requested, 0);
        assert_eq!(summary.documents_exported, 0);
        assert_eq!(summary.batches_finalized, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(!summary.interrupted);
        assert!(summary.errors.is_empty());
        assert!(summary.archives.is_empty());
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_export_summary_is_successful() {
        let mut summary = ExportSummary::new();
        assert!(summary.is_successful());

        summary.add_warning(ExportError::new(
            ExportErrorType::Resolution,
            "Collection not found".to_string(),
        ));
        assert!(summary.is_successful());

        summary.interrupted = true;
        assert!(!summary.is_successful());

        summary.interrupted = false;
        summary.add_error(ExportError::new(
            ExportErrorType::Finalize,
            "zip failed".to_string(),
        ));
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_record_delivery() {
        let mut summary = ExportSummary::new();
        summary.record_delivery("items_batch_1.zip".to_string(), 100);
        summary.record_delivery("items_batch_2.zip".to_string(), 50);

        assert_eq!(summary.batches_finalized, 2);
        assert_eq!(summary.documents_exported, 150);
        assert_eq!(summary.archives, vec!["items_batch_1.zip", "items_batch_2.zip"]);
    }

    #[test]
    fn test_export_error_with_context() {
        let error = ExportError::new(ExportErrorType::Fetch, "Fetch failed".to_string())
            .with_context("collection=dnd5e.items".to_string());

        assert_eq!(error.error_type, ExportErrorType::Fetch);
        assert_eq!(error.context, Some("collection=dnd5e.items".to_string()));
        assert_eq!(error.to_string(), "Fetch failed (collection=dnd5e.items)");
    }

    #[test]
    fn test_error_type_from_domain_error() {
        assert_eq!(
            ExportErrorType::from(&QuireError::fetch("c", "d", "gone")),
            ExportErrorType::Fetch
        );
        assert_eq!(
            ExportErrorType::from(&QuireError::Source("x".to_string())),
            ExportErrorType::Resolution
        );
        assert_eq!(
            ExportErrorType::from(&QuireError::Delivery("x".to_string())),
            ExportErrorType::Delivery
        );
    }
}
