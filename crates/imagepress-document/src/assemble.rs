// SPDX-License-Identifier: MIT
//
// Document assembler — one image per page, stretched to fill, serialized
// with `printpdf` 0.8.
//
// Pages are plain data here: each image becomes one `PdfPage` whose op
// list holds a single `UseXobject`, and the whole page sequence is
// serialized in one shot at the end. There is no incremental writing, so
// a failure anywhere leaves nothing behind.
//
// Geometry note: every image is stretched to exactly fill the fixed page,
// which may distort aspect ratio. That is the observed product behaviour
// and part of the contract, not something to "fix" with letterboxing.

use std::path::Path;

use imagepress_core::config::ConverterConfig;
use imagepress_core::error::{ImagepressError, Result};
use imagepress_core::types::{PageSpec, PaperSize};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

use crate::collection::Snapshot;
use crate::decode::{self, DecodedImage};

/// Default filename for exported documents.
pub const DEFAULT_FILENAME: &str = "images.pdf";

/// Render DPI used when computing the stretch transform.
const EMBED_DPI: f32 = 150.0;

/// A finished paginated document.
///
/// Immutable after assembly; the caller owns it and decides what the
/// save/export side effect looks like.
#[derive(Debug, Clone)]
pub struct Document {
    bytes: Vec<u8>,
    page_count: usize,
}

impl Document {
    /// The serialized PDF.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Write the document to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.bytes)?;
        info!(
            path = %path.as_ref().display(),
            bytes = self.bytes.len(),
            "document written"
        );
        Ok(())
    }
}

/// Turns a snapshot of ordered images into a complete PDF.
///
/// The page geometry is fixed once for the whole document; pages are
/// emitted in snapshot order, one image per page.
pub struct DocumentAssembler {
    page: PageSpec,
    title: String,
    decode_concurrency: usize,
}

impl DocumentAssembler {
    /// Create an assembler targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        let defaults = ConverterConfig::default();
        Self {
            page: PageSpec::from(paper_size),
            title: defaults.title,
            decode_concurrency: defaults.decode_concurrency,
        }
    }

    /// Create an assembler defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            page: PageSpec::from(config.paper_size),
            title: config.title.clone(),
            decode_concurrency: config.decode_concurrency,
        }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn page_spec(&self) -> PageSpec {
        self.page
    }

    /// Assemble the snapshot into a single PDF.
    ///
    /// Fails with `EmptyInput` before any work if the snapshot is empty,
    /// and with `Decode` (tagged with the offending position) if any
    /// image cannot be read. Failures are terminal for the call: no
    /// partial document is ever produced, and partially built state is
    /// simply dropped.
    #[instrument(skip(self, snapshot), fields(images = snapshot.len()))]
    pub async fn assemble(&self, snapshot: &Snapshot) -> Result<Document> {
        if snapshot.is_empty() {
            return Err(ImagepressError::EmptyInput);
        }

        let decoded = decode::decode_ordered(snapshot, self.decode_concurrency).await?;
        let page_count = decoded.len();

        let page_w = Mm(self.page.width_mm);
        let page_h = Mm(self.page.height_mm);

        let mut doc = PdfDocument::new(&self.title);
        let mut pages = Vec::with_capacity(page_count);

        for image in decoded {
            let ops = vec![self.embed_op(&mut doc, image)];
            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

        if bytes.is_empty() {
            return Err(ImagepressError::Pdf("serializer produced no output".into()));
        }

        debug!(warnings = warnings.len(), "PDF serialized");
        info!(pages = page_count, bytes = bytes.len(), "document assembled");

        Ok(Document { bytes, page_count })
    }

    /// Register the image as an XObject and produce the op that stretches
    /// it across the full page, corner (0,0) to (width,height).
    fn embed_op(&self, doc: &mut PdfDocument, image: DecodedImage) -> Op {
        let (width, height) = (image.width, image.height);

        let raw = RawImage {
            pixels: RawImageData::U8(image.rgb),
            width,
            height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = doc.add_image(&raw);

        // Native render size at EMBED_DPI, then independent per-axis
        // scale so the image fills the page exactly.
        let page_w_pt = Mm(self.page.width_mm).into_pt().0;
        let page_h_pt = Mm(self.page.height_mm).into_pt().0;
        let img_w_pt = width as f32 / EMBED_DPI * 72.0;
        let img_h_pt = height as f32 / EMBED_DPI * 72.0;

        Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(page_w_pt / img_w_pt),
                scale_y: Some(page_h_pt / img_h_pt),
                dpi: Some(EMBED_DPI),
                rotate: None,
            },
        }
    }
}
