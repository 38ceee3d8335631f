// SPDX-License-Identifier: MIT
//
// imagepress-document — ingestion, ordering, and PDF assembly.
//
// Data flows strictly left to right: the ingestion boundary screens raw
// files into `ImageItem`s, the `ImageCollection` keeps them in user order,
// and the `DocumentAssembler` turns a snapshot of that order into a single
// PDF with one image per page. `ConverterService` wires the pieces together
// for the presentation layer.

pub mod assemble;
pub mod collection;
pub mod decode;
pub mod ingest;
pub mod service;

pub use assemble::{DEFAULT_FILENAME, Document, DocumentAssembler};
pub use collection::{ImageCollection, ImageItem, ImagePreview, Snapshot};
pub use ingest::{BatchReport, IncomingFile, RejectedFile};
pub use service::{BatchOutcome, ConverterService};
