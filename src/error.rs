//! Error types for markleaf library.

use std::io;
use thiserror::Error;

/// Result type alias for markleaf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while importing, decorating or editing documents.
///
/// The HTML importer and the decoration tokenizer never fail; these errors
/// come from I/O, cursor validation, string parsing and rendering.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A grammar rule pattern failed to compile.
    #[error("Invalid grammar pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A path does not point at the expected node.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A cursor offset lies past the end of its text leaf.
    #[error("Offset {offset} is out of range (text has {len} characters)")]
    OffsetOutOfRange {
        /// Requested character offset
        offset: usize,
        /// Character length of the text leaf
        len: usize,
    },

    /// The operation needs a cursor but the editor has none.
    #[error("Editor has no selection")]
    NoSelection,

    /// Unknown text mark name.
    #[error("Unknown mark: {0}")]
    UnknownMark(String),

    /// Unknown block format name.
    #[error("Unknown block format: {0}")]
    UnknownBlockFormat(String),

    /// Error during rendering (Markdown, text, HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoSelection;
        assert_eq!(err.to_string(), "Editor has no selection");

        let err = Error::OffsetOutOfRange { offset: 10, len: 5 };
        assert_eq!(
            err.to_string(),
            "Offset 10 is out of range (text has 5 characters)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_regex_error_conversion() {
        let re_err = regex::Regex::new("(").unwrap_err();
        let err: Error = re_err.into();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
