// SPDX-License-Identifier: MIT
//
// Ordered concurrent image decoding: bounded fan-out, ordered fan-in.
//
// Page order is semantically significant, so decoded results must come
// back index-for-index even though the decodes themselves run in
// parallel. `buffered` gives exactly that: up to `concurrency` blocking
// decodes in flight, results yielded in input order.

use futures::stream::{self, StreamExt, TryStreamExt};
use imagepress_core::error::{ImagepressError, Result};
use tokio::task;
use tracing::{debug, instrument};

use crate::collection::Snapshot;

/// A fully decoded raster image, ready for embedding.
///
/// Pixels are row-major RGB8, the layout `printpdf` expects.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub rgb: Vec<u8>,
}

/// Decode every image in the snapshot, in input order.
///
/// Decodes fan out across blocking worker threads, at most `concurrency`
/// at a time, and fan back in ordered. Because results are yielded in
/// input order, the first error reported is always the earliest failing
/// input, regardless of completion order — and it aborts everything.
#[instrument(skip(snapshot), fields(images = snapshot.len(), concurrency))]
pub async fn decode_ordered(snapshot: &Snapshot, concurrency: usize) -> Result<Vec<DecodedImage>> {
    let concurrency = concurrency.max(1);
    let items = snapshot.arcs().to_vec();

    stream::iter(items.into_iter().enumerate())
        .map(|(index, item)| task::spawn_blocking(move || decode_one(index, item.bytes())))
        .buffered(concurrency)
        .map(|joined| match joined {
            Ok(result) => result,
            Err(err) => Err(ImagepressError::Internal(format!(
                "decode worker failed: {err}"
            ))),
        })
        .try_collect()
        .await
}

/// Decode a single image to RGB8.
fn decode_one(index: usize, bytes: &[u8]) -> Result<DecodedImage> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| ImagepressError::Decode {
        index,
        reason: err.to_string(),
    })?;

    let width = dynamic.width() as usize;
    let height = dynamic.height() as usize;
    let rgb = dynamic.to_rgb8().into_raw();

    debug!(index, width, height, "image decoded");
    Ok(DecodedImage { width, height, rgb })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{ImageCollection, ImageItem};
    use chrono::DateTime;
    use imagepress_core::types::MediaType;

    /// Helper: a solid-colour PNG of the given size, encoded in memory.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 120, 180]));
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut cursor, image::ImageFormat::Png)
            .expect("encode png");
        buffer
    }

    fn snapshot_of(payloads: Vec<Vec<u8>>) -> Snapshot {
        let mut collection = ImageCollection::new();
        let batch = payloads
            .into_iter()
            .enumerate()
            .map(|(i, bytes)| {
                let stamp = DateTime::from_timestamp(i as i64, 0).expect("valid timestamp");
                ImageItem::new(MediaType::Png, bytes, stamp, None)
            })
            .collect();
        collection.append_batch(batch).expect("append");
        collection.snapshot()
    }

    #[tokio::test]
    async fn results_come_back_in_input_order() {
        let snapshot = snapshot_of(vec![png_bytes(2, 2), png_bytes(3, 3), png_bytes(4, 4)]);

        let decoded = decode_ordered(&snapshot, 8).await.expect("decode");
        let widths: Vec<_> = decoded.iter().map(|d| d.width).collect();
        assert_eq!(widths, vec![2, 3, 4]);
        assert_eq!(decoded[0].rgb.len(), 2 * 2 * 3);
    }

    #[tokio::test]
    async fn failure_reports_the_offending_index() {
        let snapshot = snapshot_of(vec![
            png_bytes(2, 2),
            b"definitely not an image".to_vec(),
            png_bytes(2, 2),
        ]);

        let err = decode_ordered(&snapshot, 4).await.expect_err("must fail");
        assert!(matches!(err, ImagepressError::Decode { index: 1, .. }));
    }

    #[tokio::test]
    async fn concurrency_of_one_still_works() {
        let snapshot = snapshot_of(vec![png_bytes(2, 2), png_bytes(2, 2)]);
        let decoded = decode_ordered(&snapshot, 1).await.expect("decode");
        assert_eq!(decoded.len(), 2);
    }

    #[tokio::test]
    async fn zero_concurrency_is_clamped() {
        let snapshot = snapshot_of(vec![png_bytes(2, 2)]);
        let decoded = decode_ordered(&snapshot, 0).await.expect("decode");
        assert_eq!(decoded.len(), 1);
    }
}
