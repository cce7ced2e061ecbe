//! Error types for Blockport operations.
//!
//! The extraction and projection functions are total and never fail on sparse
//! or malformed markup. [`BlockportError`] covers only the seams around them:
//! selector parsing, configuration loading, JSON (de)serialization of drafts,
//! and file I/O.
//!
//! # Example
//!
//! ```rust
//! use blockport_core::{BlockportError, Result};
//!
//! fn require_html(html: &str) -> Result<&str> {
//!     if html.trim().is_empty() {
//!         return Err(BlockportError::NoContent);
//!     }
//!     Ok(html)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Blockport operations.
#[derive(Error, Debug)]
pub enum BlockportError {
    /// Invalid CSS selector or otherwise unusable markup.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A deserialized block broke one of the block model invariants.
    ///
    /// Returned instead of silently coercing, e.g. a heading that carries
    /// link segments or a link with an empty url.
    #[error("Invalid block: {0}")]
    InvalidBlock(String),

    /// No content could be extracted from the input.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Wraps standard I/O errors for file operations.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// JSON (de)serialization errors for drafts, blocks and documents.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration errors.
    ///
    /// Returned when a category table is malformed or references unknown categories.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A timestamp could not be rendered.
    #[error("Failed to format timestamp: {0}")]
    TimeFormat(#[from] time::error::Format),
}

/// Result type alias for BlockportError.
pub type Result<T> = std::result::Result<T, BlockportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlockportError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_invalid_block_error() {
        let err = BlockportError::InvalidBlock("heading with segments".to_string());
        assert!(err.to_string().contains("heading with segments"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: BlockportError = parse_err.into();
        assert!(matches!(err, BlockportError::JsonError(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_file_not_found_error() {
        let err = BlockportError::FileNotFound(PathBuf::from("missing.html"));
        assert!(err.to_string().contains("missing.html"));
    }
}
