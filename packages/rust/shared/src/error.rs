//! Error types for GuideForge.
//!
//! Library crates use [`GuideError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all guide operations.
///
/// The first four variants are the terminal failure modes of a single guide
/// request. None are retried internally; callers may retry `Unreadable`
/// (possibly transient) but must not retry `Malformed` or
/// `TransformationFailed` (deterministic).
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    /// No document exists at the resolved location.
    #[error("guide not found: {guide_id}")]
    NotFound { guide_id: String },

    /// I/O failure reading an existing location.
    #[error("unreadable content at {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The bytes at the location are not valid JSON.
    #[error("malformed content: {message}")]
    Malformed { message: String },

    /// The document parses but lacks the minimum of a title and any
    /// extractable content.
    #[error("transformation failed for {guide_id}: {message}")]
    TransformationFailed { guide_id: String, message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GuideError>;

impl GuideError {
    /// Create a not-found error for a guide id.
    pub fn not_found(guide_id: impl Into<String>) -> Self {
        Self::NotFound {
            guide_id: guide_id.into(),
        }
    }

    /// Wrap a `std::io::Error` with the path that failed.
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-content error from any displayable message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed {
            message: msg.into(),
        }
    }

    /// Create a transformation-failed error for a guide id.
    pub fn transformation_failed(
        guide_id: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::TransformationFailed {
            guide_id: guide_id.into(),
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether a caller may reasonably retry the failed request.
    ///
    /// Only `Unreadable` qualifies; the other failure modes are
    /// deterministic for a given document.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unreadable { .. })
    }
}
