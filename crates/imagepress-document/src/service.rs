// SPDX-License-Identifier: MIT
//
// Converter service — the front door for the presentation layer.
//
// Owns the shared `ImageCollection` behind a mutex so appends and
// removals are applied atomically with respect to snapshot-taking, and
// enforces the single-flight generation policy: a second `generate`
// while one is running is rejected, never interleaved. All fields are
// cheaply cloneable (Arc-wrapped) so the struct can be passed into
// closures and async blocks without lifetime issues.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use imagepress_core::config::ConverterConfig;
use imagepress_core::error::{ImagepressError, Result};
use tracing::{info, instrument, warn};

use crate::assemble::{Document, DocumentAssembler};
use crate::collection::{ImageCollection, ImagePreview};
use crate::ingest::{self, BatchReport, IncomingFile, RejectedFile};

/// What happened to one submitted batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Number of images appended to the collection.
    pub appended: usize,
    /// Files rejected at the ingestion boundary.
    pub rejected: Vec<RejectedFile>,
}

/// Shared conversion service; one per UI session.
#[derive(Clone)]
pub struct ConverterService {
    collection: Arc<Mutex<ImageCollection>>,
    assembler: Arc<DocumentAssembler>,
    generating: Arc<AtomicBool>,
    output_filename: String,
}

impl ConverterService {
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self {
            assembler: Arc::new(DocumentAssembler::from_config(&config)),
            collection: Arc::new(Mutex::new(ImageCollection::new())),
            generating: Arc::new(AtomicBool::new(false)),
            output_filename: config.output_filename,
        }
    }

    // -- Ingestion -------------------------------------------------------------

    /// Screen and append one batch from either entry point (file picker
    /// or drag-and-drop).
    ///
    /// Lenient per item: bad files are dropped and reported, good files
    /// in the same batch are still appended, sorted by timestamp.
    #[instrument(skip(self, files), fields(batch_len = files.len()))]
    pub fn add_batch(&self, files: Vec<IncomingFile>) -> Result<BatchOutcome> {
        let BatchReport { accepted, rejected } = ingest::screen_batch(files);

        if accepted.is_empty() {
            if rejected.is_empty() {
                return Err(ImagepressError::EmptyBatch);
            }
            // Everything was screened out; nothing to append.
            return Ok(BatchOutcome {
                appended: 0,
                rejected,
            });
        }

        let appended = {
            let mut collection = self.collection.lock().expect("collection lock poisoned");
            collection.append_batch(accepted)?
        };

        Ok(BatchOutcome { appended, rejected })
    }

    // -- Display boundary ------------------------------------------------------

    /// Preview handles for every image, in collection order.
    pub fn previews(&self) -> Vec<ImagePreview> {
        self.collection
            .lock()
            .expect("collection lock poisoned")
            .previews()
    }

    pub fn image_count(&self) -> usize {
        self.collection
            .lock()
            .expect("collection lock poisoned")
            .len()
    }

    /// Remove one image by its current position.
    ///
    /// A stale index is a caller bug (the UI raced a mutation): logged
    /// and ignored rather than crashing the session.
    #[instrument(skip(self))]
    pub fn remove_at(&self, index: usize) {
        let mut collection = self.collection.lock().expect("collection lock poisoned");
        if let Err(err) = collection.remove_at(index) {
            warn!(%err, "ignoring removal at stale index");
        }
    }

    /// Drop every image.
    pub fn clear(&self) {
        self.collection
            .lock()
            .expect("collection lock poisoned")
            .clear();
    }

    // -- Generation ------------------------------------------------------------

    /// Generate the PDF from the current collection state.
    ///
    /// A second invocation while one is in flight is rejected with
    /// `AssemblyInProgress`. The snapshot is taken up front, so deletions
    /// made while the document is being assembled only affect later
    /// generations — never the one in flight.
    #[instrument(skip(self))]
    pub async fn generate(&self) -> Result<Document> {
        let _guard = self.begin_generation()?;

        let snapshot = {
            let collection = self.collection.lock().expect("collection lock poisoned");
            collection.snapshot()
        };

        let document = self.assembler.assemble(&snapshot).await?;
        info!(pages = document.page_count(), "generation finished");
        Ok(document)
    }

    /// Generate and write the document out.
    ///
    /// With `None`, the configured default filename is used in the
    /// current working directory.
    pub async fn generate_to_file(&self, path: Option<&Path>) -> Result<Document> {
        let document = self.generate().await?;
        match path {
            Some(path) => document.write_to_file(path)?,
            None => document.write_to_file(&self.output_filename)?,
        }
        Ok(document)
    }

    /// Claim the single generation slot, or fail if it is taken.
    fn begin_generation(&self) -> Result<GenerationGuard> {
        if self
            .generating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ImagepressError::AssemblyInProgress);
        }
        Ok(GenerationGuard {
            flag: Arc::clone(&self.generating),
        })
    }
}

impl Default for ConverterService {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the generation slot when the run ends, on success or error.
struct GenerationGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
