// SPDX-License-Identifier: MIT
//
// Human-readable error messages for the presentation layer.
//
// Every engine error is mapped to plain English with a clear suggestion.
// Severity drives how the UI presents the message.

use crate::error::ImagepressError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Momentary condition — trying again is likely to work.
    Transient,
    /// User must do something first (add images, free disk space).
    ActionRequired,
    /// Cannot be fixed by retrying — bad file, wrong format.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether trying the same action again can succeed.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert an `ImagepressError` into something a user can act on.
pub fn humanize_error(err: &ImagepressError) -> HumanError {
    match err {
        ImagepressError::EmptyInput => HumanError {
            message: "There's nothing to convert yet.".into(),
            suggestion: "Add one or more images, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ImagepressError::EmptyBatch => HumanError {
            message: "No files were selected.".into(),
            suggestion: "Pick at least one image file or drop images onto the window.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ImagepressError::Decode { index, .. } => HumanError {
            // Positions are 1-based for people.
            message: format!("Image {} couldn't be read.", index + 1),
            suggestion: "It may be damaged or in an unusual format. Remove it from the list, \
                         or re-save it as a JPEG or PNG and add it again."
                .into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        ImagepressError::OutOfRange { .. } => HumanError {
            message: "That image is no longer in the list.".into(),
            suggestion: "The list has changed since you last looked. Try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ImagepressError::UnsupportedMediaType(detail) => HumanError {
            message: "That file isn't an image.".into(),
            suggestion: format!(
                "Only image files can be converted to PDF pages. (File type: {detail})"
            ),
            retriable: false,
            severity: Severity::Permanent,
        },

        ImagepressError::AssemblyInProgress => HumanError {
            message: "A PDF is already being created.".into(),
            suggestion: "Wait for the current document to finish, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ImagepressError::Pdf(_) => HumanError {
            message: "The PDF couldn't be created.".into(),
            suggestion: "Try again. If the problem persists, remove the most recently added \
                         image and retry."
                .into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ImagepressError::Io(_) => HumanError {
            message: "The file couldn't be saved.".into(),
            suggestion: "Check that there is enough disk space and that the destination folder \
                         is writable."
                .into(),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        ImagepressError::Serialization(_) | ImagepressError::Internal(_) => HumanError {
            message: "Something went wrong inside the converter.".into(),
            suggestion: "Try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
