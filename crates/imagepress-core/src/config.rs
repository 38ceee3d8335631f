// SPDX-License-Identifier: MIT
//
// Conversion engine configuration.

use serde::{Deserialize, Serialize};

/// Settings for the conversion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Paper size used for every page of a generated document.
    pub paper_size: crate::PaperSize,
    /// Title embedded in the PDF /Info dictionary.
    pub title: String,
    /// Default filename for the exported document.
    pub output_filename: String,
    /// Upper bound on concurrently running image decodes.
    pub decode_concurrency: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            paper_size: crate::PaperSize::A4,
            title: "Converted Images".into(),
            output_filename: "images.pdf".into(),
            decode_concurrency: 4,
        }
    }
}
