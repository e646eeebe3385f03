//! Error types for pith operations.
//!
//! This module defines the main error type [`PithError`] which represents
//! all possible errors that can occur while reading a document, running the
//! extraction pipeline, rendering the result, and fetching input.
//!
//! # Example
//!
//! ```rust
//! use pith_core::{PithError, Result};
//!
//! fn require_body(html: &str) -> Result<()> {
//!     if !html.contains("<body") {
//!         return Err(PithError::NoBody);
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for content extraction.
///
/// The pipeline variants (`NoBody`, `EmptyDensity`, `VoidWithChildren`,
/// `UnknownNodeKind`) are local faults of a single document and are never
/// retried. The remaining variants come from configuration and input adapters.
///
/// # Example
///
/// ```rust
/// use pith_core::{PithError, extract};
///
/// match extract("<html><body><p>Hello</p></body></html>") {
///     Ok(article) => println!("{}", article.text()),
///     Err(PithError::NoBody) => println!("document has no body"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum PithError {
    /// The parsed document has no `<body>` element.
    ///
    /// Every later stage works on the body subtree, so this is fatal.
    #[error("Document has no body element")]
    NoBody,

    /// The density table is empty after analysis.
    ///
    /// Unreachable once a body was found; reported instead of ignored.
    #[error("Density table is empty")]
    EmptyDensity,

    /// A void element carries children at render time.
    #[error("Void element <{tag}> has child nodes")]
    VoidWithChildren { tag: String },

    /// The tree source produced a node kind the pipeline does not handle.
    #[error("Unknown node kind: {0}")]
    UnknownNodeKind(String),

    /// Rejected configuration values (e.g. an empty leash domain).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// File not found.
    ///
    /// Returned when attempting to read a file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Markdown conversion failed.
    #[error("Markdown conversion failed: {0}")]
    Markdown(String),

    /// JSON serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PithError {
    fn from(err: serde_json::Error) -> Self {
        PithError::Serialization(err.to_string())
    }
}

/// Result type alias for PithError.
///
/// This is a convenience alias for `std::result::Result<T, PithError>`.
pub type Result<T> = std::result::Result<T, PithError>;
