//! Composition engine: merge source documents, stamp every page, serialize.
//!
//! The engine consumes a [`CompositionJob`] exactly once and produces the
//! job's sole artifact, a serialized PDF. It never mutates the session
//! state it borrows; all drawing happens inside the merged output document.

pub mod job;
pub mod merge;
pub mod overlay;
pub mod transform;

pub use job::{Composed, ComposeStats, CompositionJob};
pub use merge::merge_documents;
pub use overlay::STAMP_FONT_KEY;
pub use transform::{text_anchor, PointRect, PreviewTransform};

use crate::error::{OverstampError, OverstampResult};
use std::path::Path;

/// Preview render scale the session's rectangle coordinates are captured
/// against. Shared by every page and every document in a session.
pub const DEFAULT_PREVIEW_SCALE: f32 = 1.2;

/// Download name for composed output.
pub const DEFAULT_OUTPUT_NAME: &str = "merged-replaced.pdf";

/// Coordinates one composition run: validate, merge, stamp, serialize.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeService;

impl ComposeService {
    pub fn new() -> Self {
        Self
    }

    /// Runs a composition job to completion.
    ///
    /// Input validation happens before any work; afterwards the stages run
    /// in order (merge, per-page stamping, serialization) and the first
    /// failure aborts the job with no partial output.
    pub fn compose(&self, job: &CompositionJob) -> OverstampResult<Composed> {
        job.validate()?;

        let mut doc = merge::merge_documents(job.documents)?;
        let stamps_applied = overlay::stamp_document(&mut doc, job)?;

        let stats = ComposeStats {
            documents_merged: job.documents.len(),
            pages_processed: doc.get_pages().len(),
            stamps_applied,
        };

        doc.compress();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| OverstampError::Serialize {
                source: lopdf::Error::IO(e),
            })?;

        Ok(Composed { bytes, stats })
    }

    /// Extracts text from a PDF, for verifying stamped output.
    pub fn extract_text(&self, input: &Path) -> OverstampResult<String> {
        let bytes = std::fs::read(input).map_err(|e| OverstampError::Io {
            path: input.to_path_buf(),
            source: e,
        })?;
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| OverstampError::TextExtraction {
            path: input.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
