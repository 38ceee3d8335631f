// SPDX-License-Identifier: MIT
//
// Ingestion boundary — screens raw file blobs down to image items.
//
// Both entry points (explicit file selection and drag-and-drop) share
// this contract. Screening is lenient per item: a bad file is dropped
// and reported, the rest of the batch still goes through. Assembly, by
// contrast, is all-or-nothing; the asymmetry is deliberate.

use chrono::{DateTime, Utc};
use imagepress_core::error::ImagepressError;
use imagepress_core::types::MediaType;
use tracing::{info, instrument, warn};

use crate::collection::ImageItem;

/// One raw file handed over by the presentation layer.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Original filename, if known.
    pub name: Option<String>,
    /// Declared media type, e.g. "image/png".
    pub media_type: String,
    /// Last-modified timestamp, if the source provides one.
    pub last_modified: Option<DateTime<Utc>>,
    /// Raw encoded file contents.
    pub bytes: Vec<u8>,
}

/// A file dropped at the boundary, with the reason.
#[derive(Debug)]
pub struct RejectedFile {
    pub name: Option<String>,
    pub error: ImagepressError,
}

/// Outcome of screening one batch.
#[derive(Debug)]
pub struct BatchReport {
    /// Files accepted as images, in arrival order.
    pub accepted: Vec<ImageItem>,
    /// Files rejected at the boundary.
    pub rejected: Vec<RejectedFile>,
}

/// Screen a batch of raw files down to image items.
///
/// Non-image media types are rejected here and never reach the
/// collection. The declared MIME type wins; when it is unusable, the
/// filename extension is tried as a fallback. Files without a usable
/// timestamp are stamped with their arrival time so ordering within the
/// batch stays total.
#[instrument(skip(files), fields(batch_len = files.len()))]
pub fn screen_batch(files: Vec<IncomingFile>) -> BatchReport {
    let mut accepted = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();

    for file in files {
        match resolve_media_type(&file) {
            Some(media_type) => {
                let captured_at = file.last_modified.unwrap_or_else(Utc::now);
                accepted.push(ImageItem::new(
                    media_type,
                    file.bytes,
                    captured_at,
                    file.name,
                ));
            }
            None => {
                warn!(
                    media_type = %file.media_type,
                    name = ?file.name,
                    "non-image file rejected at boundary"
                );
                rejected.push(RejectedFile {
                    name: file.name,
                    error: ImagepressError::UnsupportedMediaType(file.media_type),
                });
            }
        }
    }

    info!(
        accepted = accepted.len(),
        rejected = rejected.len(),
        "batch screened"
    );

    BatchReport { accepted, rejected }
}

/// Declared MIME type first, filename extension as fallback.
fn resolve_media_type(file: &IncomingFile) -> Option<MediaType> {
    MediaType::from_mime(&file.media_type).or_else(|| {
        file.name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .and_then(|(_, ext)| MediaType::from_extension(ext))
    })
}
