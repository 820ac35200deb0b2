//! Export coordinator - main orchestrator for the export process
//!
//! The coordinator walks the requested collections in order, fetches each
//! document in index order, renders its entries and packs them into batches of
//! at most `batch_size` documents. Full batches are finalized and delivered as
//! soon as they fill; a trailing partial batch is finalized when the
//! collection is exhausted.
//!
//! A shutdown request is observed before each collection and before each
//! document. It halts the run immediately: the batch being filled is dropped,
//! not flushed.
//!
//! Failures are contained. An unknown or empty collection is skipped with a
//! warning. A fetch or render error abandons the rest of that collection. A
//! finalize or delivery error loses only that batch. None of them stop the
//! other collections.

use crate::adapters::archive::{ArchiveFactory, ZipArchiveFactory};
use crate::adapters::sink::{BatchSink, DirectorySink};
use crate::adapters::source::{DocumentSource, FilesystemSource};
use crate::config::QuireConfig;
use crate::core::export::batch::{BatchConfig, ExportBatch};
use crate::core::export::formats::EntryRenderer;
use crate::core::export::naming::archive_file_name;
use crate::core::export::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::core::scrub::{ContentScrubber, ExclusionConfig};
use crate::domain::{CollectionKey, QuireError, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// How processing of one collection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollectionOutcome {
    /// Every document was processed
    Completed,
    /// Unknown key or empty index
    Skipped,
    /// Shutdown observed mid-collection
    Halted,
}

/// Export coordinator
pub struct ExportCoordinator {
    source: Arc<dyn DocumentSource>,
    archives: Arc<dyn ArchiveFactory>,
    sink: Arc<dyn BatchSink>,
    batch_config: BatchConfig,
    renderer: EntryRenderer,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator from explicit collaborators
    pub fn new(
        source: Arc<dyn DocumentSource>,
        archives: Arc<dyn ArchiveFactory>,
        sink: Arc<dyn BatchSink>,
        batch_config: BatchConfig,
        exclusions: ExclusionConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        let renderer = EntryRenderer::new(batch_config.formats, ContentScrubber::new(exclusions));

        Self {
            source,
            archives,
            sink,
            batch_config,
            renderer,
            shutdown_signal,
        }
    }

    /// Create a coordinator wired to the filesystem source, ZIP archives and
    /// the output directory named in `config`
    ///
    /// # Errors
    ///
    /// Returns [`QuireError::Configuration`] for an invalid batch policy and
    /// [`QuireError::Source`] if the source directory cannot be opened.
    pub async fn from_config(
        config: &QuireConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let batch_config = BatchConfig::from_config(&config.export)?;
        let exclusions = ExclusionConfig::from_lists(
            &config.scrub.excluded_keys,
            &config.scrub.excluded_substrings,
        );

        let source = Arc::new(FilesystemSource::open(&config.source.path).await?);
        let sink =
            Arc::new(DirectorySink::new(&config.export.output_dir).with_dry_run(config.export.dry_run));

        Ok(Self::new(
            source,
            Arc::new(ZipArchiveFactory::new()),
            sink,
            batch_config,
            exclusions,
            shutdown_signal,
        ))
    }

    /// The batching policy in effect
    pub fn batch_config(&self) -> &BatchConfig {
        &self.batch_config
    }

    /// Turn configured collection keys into the run's selection
    ///
    /// An empty `requested` list selects every collection the source lists.
    ///
    /// # Errors
    ///
    /// Returns [`QuireError::Configuration`] for a blank key and propagates
    /// source errors from listing.
    pub async fn select_collections(&self, requested: &[String]) -> Result<Vec<CollectionKey>> {
        if requested.is_empty() {
            let listed = self.source.list_collections().await?;
            tracing::debug!(count = listed.len(), "Selected every listed collection");
            return Ok(listed.into_iter().map(|info| info.key).collect());
        }

        requested
            .iter()
            .map(|key| CollectionKey::new(key.trim()).map_err(QuireError::Configuration))
            .collect()
    }

    /// Check if shutdown has been requested
    fn is_shutdown_requested(&self) -> bool {
        *self.shutdown_signal.borrow()
    }

    /// Execute the export of `collections`, in the given order
    ///
    /// Per-collection and per-batch failures are recorded in the returned
    /// summary rather than returned as errors.
    ///
    /// # Errors
    ///
    /// Returns [`QuireError::Configuration`] if no collections are given.
    pub async fn execute_export(&self, collections: &[CollectionKey]) -> Result<ExportSummary> {
        if collections.is_empty() {
            return Err(QuireError::Configuration(
                "No collections selected for export".to_string(),
            ));
        }

        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.started_at = Some(Utc::now());
        summary.collections_requested = collections.len();

        tracing::info!(
            collections = collections.len(),
            batch_size = self.batch_config.batch_size,
            yaml = self.batch_config.formats.yaml,
            json = self.batch_config.formats.json,
            txt = self.batch_config.formats.txt,
            "Starting export"
        );

        for (position, key) in collections.iter().enumerate() {
            if self.is_shutdown_requested() {
                tracing::warn!(collection = %key, "Shutdown requested, halting export");
                summary.interrupted = true;
                break;
            }

            tracing::info!(
                collection = %key,
                position = position + 1,
                total = collections.len(),
                "Processing collection"
            );

            match self.export_collection(key, &mut summary).await {
                Ok(CollectionOutcome::Completed) => {
                    summary.collections_completed += 1;
                    tracing::info!(
                        collection = %key,
                        completed = summary.collections_completed,
                        total = collections.len(),
                        "Collection exported"
                    );
                }
                Ok(CollectionOutcome::Skipped) => {
                    summary.collections_skipped += 1;
                }
                Ok(CollectionOutcome::Halted) => {
                    summary.interrupted = true;
                    break;
                }
                Err(error) => {
                    tracing::error!(
                        collection = %key,
                        error_type = ?error.error_type,
                        error = %error.message,
                        "Failed to export collection"
                    );
                    summary.collections_failed += 1;
                    summary.add_error(error);
                }
            }
        }

        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Export one collection
    ///
    /// Returns `Err` only for errors that abandon the rest of the collection.
    async fn export_collection(
        &self,
        key: &CollectionKey,
        summary: &mut ExportSummary,
    ) -> std::result::Result<CollectionOutcome, ExportError> {
        let context = || format!("collection={key}");

        let index = match self.source.resolve_collection(key).await {
            Ok(Some(index)) if !index.is_empty() => index,
            Ok(Some(_)) => {
                tracing::warn!(collection = %key, "Skipping empty collection");
                summary.add_warning(
                    ExportError::new(ExportErrorType::Resolution, "Collection is empty".to_string())
                        .with_context(context()),
                );
                return Ok(CollectionOutcome::Skipped);
            }
            Ok(None) => {
                tracing::warn!(collection = %key, "Skipping unknown collection");
                summary.add_warning(
                    ExportError::new(
                        ExportErrorType::Resolution,
                        "Collection not found".to_string(),
                    )
                    .with_context(context()),
                );
                return Ok(CollectionOutcome::Skipped);
            }
            Err(e) => {
                return Err(
                    ExportError::new(ExportErrorType::Resolution, e.to_string())
                        .with_context(context()),
                );
            }
        };

        tracing::debug!(collection = %key, documents = index.len(), "Resolved collection");

        let batch_size = self.batch_config.batch_size;
        let mut batch = ExportBatch::new(1, self.archives.create());

        for (position, document_id) in index.document_ids.iter().enumerate() {
            if position > 0 && !self.batch_config.min_wait.is_zero() {
                tokio::time::sleep(self.batch_config.min_wait).await;
            }

            if self.is_shutdown_requested() {
                tracing::warn!(
                    collection = %key,
                    batch = batch.number(),
                    discarded_documents = batch.document_count(),
                    "Shutdown requested, discarding unfinished batch"
                );
                return Ok(CollectionOutcome::Halted);
            }

            let document = self
                .source
                .fetch_document(key, document_id)
                .await
                .map_err(|e| document_error(&e, key, batch.number(), document_id.as_str()))?;

            let entries = self
                .renderer
                .render(&document)
                .map_err(|e| document_error(&e, key, batch.number(), document_id.as_str()))?;

            batch
                .add_document(entries)
                .map_err(|e| document_error(&e, key, batch.number(), document_id.as_str()))?;

            tracing::trace!(
                collection = %key,
                document_id = %document_id,
                batch = batch.number(),
                "Added document to batch"
            );

            if batch.is_full(batch_size) {
                let next = ExportBatch::new(batch.number() + 1, self.archives.create());
                let full = std::mem::replace(&mut batch, next);
                self.finalize_batch(key, full, summary).await;
            }
        }

        if !batch.is_empty() {
            self.finalize_batch(key, batch, summary).await;
        }

        Ok(CollectionOutcome::Completed)
    }

    /// Finalize and deliver one batch, recording the outcome
    ///
    /// Failures lose this batch only; the caller carries on with the next.
    async fn finalize_batch(
        &self,
        key: &CollectionKey,
        batch: ExportBatch,
        summary: &mut ExportSummary,
    ) {
        let number = batch.number();
        let documents = batch.document_count();
        let entries = batch.entry_count();
        let context = format!("collection={key}, batch={number}");

        tracing::info!(
            collection = %key,
            batch = number,
            documents,
            entries,
            "Finalizing batch"
        );

        let bytes = match batch.finalize().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(
                    collection = %key,
                    batch = number,
                    error = %e,
                    "Failed to finalize batch"
                );
                summary.batches_failed += 1;
                summary.add_error(
                    ExportError::new(ExportErrorType::Finalize, e.to_string()).with_context(context),
                );
                return;
            }
        };

        let file_name = archive_file_name(key, number, self.archives.extension());
        let size = bytes.len();

        match self.sink.deliver(&file_name, bytes).await {
            Ok(()) => {
                tracing::info!(
                    collection = %key,
                    batch = number,
                    file = %file_name,
                    bytes = size,
                    "Batch delivered"
                );
                summary.record_delivery(file_name, documents);
            }
            Err(e) => {
                tracing::error!(
                    collection = %key,
                    batch = number,
                    file = %file_name,
                    error = %e,
                    "Failed to deliver batch"
                );
                summary.batches_failed += 1;
                summary.add_error(
                    ExportError::new(ExportErrorType::Delivery, e.to_string()).with_context(context),
                );
            }
        }
    }
}

fn document_error(
    error: &QuireError,
    key: &CollectionKey,
    batch: u32,
    document_id: &str,
) -> ExportError {
    ExportError::new(ExportErrorType::from(error), error.to_string()).with_context(format!(
        "collection={key}, batch={batch}, document_id={document_id}"
    ))
}
