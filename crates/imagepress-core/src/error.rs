// SPDX-License-Identifier: MIT
//
// Unified error types for imagepress.

use thiserror::Error;

/// Top-level error type for all imagepress operations.
#[derive(Debug, Error)]
pub enum ImagepressError {
    // -- Ingestion errors --
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("batch contains no files")]
    EmptyBatch,

    #[error("index {index} out of range for collection of length {len}")]
    OutOfRange { index: usize, len: usize },

    // -- Assembly errors --
    #[error("nothing to convert: the image collection is empty")]
    EmptyInput,

    #[error("failed to decode image at position {index}: {reason}")]
    Decode { index: usize, reason: String },

    #[error("a document is already being generated")]
    AssemblyInProgress,

    #[error("PDF serialization failed: {0}")]
    Pdf(String),

    // -- Ambient --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal task failure: {0}")]
    Internal(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ImagepressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_carries_index() {
        let err = ImagepressError::Decode {
            index: 2,
            reason: "truncated".into(),
        };
        let message = err.to_string();
        assert!(message.contains("position 2"));
        assert!(message.contains("truncated"));
    }

    #[test]
    fn out_of_range_reports_bounds() {
        let err = ImagepressError::OutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 7 out of range for collection of length 3"
        );
    }
}
