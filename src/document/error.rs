//! Document error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading a paged document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document file does not exist
    #[error("Document not found: {0}")]
    NotFound(PathBuf),

    /// The file is not well-formed XML
    #[error("Malformed document: {0}")]
    Malformed(#[from] quick_xml::Error),

    /// The file parsed but contains no page elements
    #[error("Document has no pages: {0}")]
    Empty(PathBuf),

    /// Any other read failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;
