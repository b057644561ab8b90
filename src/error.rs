//! Error types for the PDF stamping library.
//!
//! Errors are categorized by where they arise: user-input validation before
//! any work begins, per-document parsing, page-level processing, and final
//! serialization. Malformed colors are deliberately not represented here;
//! they fall back to a default color instead of failing the operation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for composition operations.
pub type OverstampResult<T> = Result<T, OverstampError>;

/// Error type for all composition operations.
#[derive(Debug, Error)]
pub enum OverstampError {
    /// No source documents were supplied to the job.
    #[error("no source documents to compose")]
    NoDocuments,

    /// No rectangles were defined and no fallback replacement text was
    /// supplied, so there is nothing the job could stamp.
    #[error("no rectangles defined and no fallback text supplied")]
    NoStampInput,

    /// Invalid configuration or parameters.
    #[error("invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// A source file is not a valid PDF document. One bad file fails the
    /// whole batch; no partial output is produced.
    #[error("failed to parse source document '{name}': {source}")]
    DocumentParse {
        name: String,
        #[source]
        source: lopdf::Error,
    },

    /// The document structure could not be traversed or rewritten
    /// (missing catalog, malformed page tree, unencodable content).
    #[error("PDF operation failed: {0}")]
    Operation(String),

    /// Flattening the composed document to bytes failed.
    #[error("failed to serialize output document: {source}")]
    Serialize {
        #[source]
        source: lopdf::Error,
    },

    /// Error occurred while reading or writing files.
    #[error("IO error for path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Text extraction failed (used by the `extract` verification command).
    #[error("text extraction failed for '{}': {reason}", .path.display())]
    TextExtraction { path: PathBuf, reason: String },
}
