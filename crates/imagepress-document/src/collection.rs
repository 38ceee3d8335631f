// SPDX-License-Identifier: MIT
//
// The authoritative ordered list of images the user intends to convert.
//
// Ordering policy: each batch is stable-sorted by ascending timestamp
// before it is appended, but batches are never re-sorted against each
// other. A user who uploads in two separate drops gets those drops
// concatenated, preserving manual curation order.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use imagepress_core::error::{ImagepressError, Result};
use imagepress_core::types::{ImageId, MediaType};
use tracing::{debug, info, instrument};

/// One image awaiting conversion.
///
/// Immutable once created; the collection owns it exclusively until it is
/// removed. Shared via `Arc` so snapshots and previews are cheap. Every
/// item gets a fresh id at construction, so the collection can never hold
/// two entries with the same identifier.
#[derive(Debug)]
pub struct ImageItem {
    id: ImageId,
    media_type: MediaType,
    bytes: Vec<u8>,
    captured_at: DateTime<Utc>,
    name: Option<String>,
}

impl ImageItem {
    pub fn new(
        media_type: MediaType,
        bytes: Vec<u8>,
        captured_at: DateTime<Utc>,
        name: Option<String>,
    ) -> Self {
        Self {
            id: ImageId::new(),
            media_type,
            bytes,
            captured_at,
            name,
        }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Raw encoded bytes as supplied at ingestion.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Point-in-time view of the collection, taken before an assembly run.
///
/// Holds its own `Arc` per item, so later mutations of the source
/// collection never show through an already-taken snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    items: Vec<Arc<ImageItem>>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageItem> {
        self.items.get(index).map(Arc::as_ref)
    }

    /// Restartable iteration in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageItem> {
        self.items.iter().map(Arc::as_ref)
    }

    pub(crate) fn arcs(&self) -> &[Arc<ImageItem>] {
        &self.items
    }
}

/// Displayable handle for one image, for thumbnail rendering.
///
/// Cheaply cloneable; keeps the underlying bytes alive even if the item
/// is removed from the collection while the UI still shows it.
#[derive(Debug, Clone)]
pub struct ImagePreview {
    item: Arc<ImageItem>,
}

impl ImagePreview {
    pub fn id(&self) -> ImageId {
        self.item.id()
    }

    pub fn media_type(&self) -> MediaType {
        self.item.media_type()
    }

    pub fn bytes(&self) -> &[u8] {
        self.item.bytes()
    }

    pub fn name(&self) -> Option<&str> {
        self.item.name()
    }
}

/// Mutable ordered collection of images, the single shared resource
/// between the ingestion and assembly paths.
#[derive(Debug, Default)]
pub struct ImageCollection {
    items: Vec<Arc<ImageItem>>,
}

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one batch.
    ///
    /// The batch is stable-sorted by ascending timestamp before it is
    /// appended; ties keep arrival order. No cross-batch re-sort happens.
    /// Returns the number of items appended.
    #[instrument(skip(self, batch), fields(batch_len = batch.len()))]
    pub fn append_batch(&mut self, mut batch: Vec<ImageItem>) -> Result<usize> {
        if batch.is_empty() {
            return Err(ImagepressError::EmptyBatch);
        }

        batch.sort_by_key(ImageItem::captured_at);

        let appended = batch.len();
        self.items.extend(batch.into_iter().map(Arc::new));

        info!(appended, total = self.items.len(), "batch appended");
        Ok(appended)
    }

    /// Remove exactly one entry. All entries after it shift position by
    /// one; nothing else changes. On an invalid index the collection is
    /// left untouched.
    #[instrument(skip(self))]
    pub fn remove_at(&mut self, index: usize) -> Result<Arc<ImageItem>> {
        if index >= self.items.len() {
            return Err(ImagepressError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let removed = self.items.remove(index);
        debug!(id = %removed.id(), remaining = self.items.len(), "image removed");
        Ok(removed)
    }

    /// Take a point-in-time copy for the assembler to consume.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: self.items.clone(),
        }
    }

    /// Preview handle for the entry at `index`, if it exists.
    pub fn preview(&self, index: usize) -> Option<ImagePreview> {
        self.items.get(index).map(|item| ImagePreview {
            item: Arc::clone(item),
        })
    }

    /// Preview handles for every entry, in collection order.
    pub fn previews(&self) -> Vec<ImagePreview> {
        self.items
            .iter()
            .map(|item| ImagePreview {
                item: Arc::clone(item),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Full reset.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
