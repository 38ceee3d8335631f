// SPDX-License-Identifier: MIT
//
// imagepress — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;

pub use config::ConverterConfig;
pub use error::ImagepressError;
pub use types::*;
