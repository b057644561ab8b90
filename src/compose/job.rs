//! Composition job description and statistics.

use crate::domain::{Rect, SessionState, SourceDocument};
use crate::error::{OverstampError, OverstampResult};

/// One "produce output" request: the ordered source documents, the shared
/// rectangle list, the job-level fallback replacement text, and the preview
/// scale the rectangle coordinates were captured at.
///
/// A job borrows session state for its whole duration, so the rectangle
/// list cannot be mutated mid-run. The engine never mutates its inputs;
/// running the same job twice produces equivalent output bytes.
#[derive(Debug, Clone, Copy)]
pub struct CompositionJob<'a> {
    pub documents: &'a [SourceDocument],
    pub rects: &'a [Rect],
    pub fallback_text: &'a str,
    pub preview_scale: f32,
}

impl<'a> CompositionJob<'a> {
    pub fn new(
        documents: &'a [SourceDocument],
        rects: &'a [Rect],
        fallback_text: &'a str,
        preview_scale: f32,
    ) -> Self {
        Self {
            documents,
            rects,
            fallback_text,
            preview_scale,
        }
    }

    /// Builds a job over the session's current documents and rectangles.
    pub fn from_session(
        session: &'a SessionState,
        fallback_text: &'a str,
        preview_scale: f32,
    ) -> Self {
        Self::new(
            session.documents(),
            session.rects(),
            fallback_text,
            preview_scale,
        )
    }

    /// Rejects unusable input before any work begins.
    ///
    /// Zero rectangles with a non-empty fallback is allowed: the fallback
    /// only fills rectangles that exist, so the job degrades to a plain
    /// merge.
    pub fn validate(&self) -> OverstampResult<()> {
        if self.documents.is_empty() {
            return Err(OverstampError::NoDocuments);
        }
        if self.rects.is_empty() && self.fallback_text.is_empty() {
            return Err(OverstampError::NoStampInput);
        }
        Ok(())
    }
}

/// Statistics about a finished composition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeStats {
    /// Source documents merged into the output.
    pub documents_merged: usize,
    /// Pages in the output document.
    pub pages_processed: usize,
    /// Cover/text stamps painted across all pages.
    pub stamps_applied: usize,
}

/// A finished composition: the serialized PDF plus its statistics.
#[derive(Debug, Clone)]
pub struct Composed {
    pub bytes: Vec<u8>,
    pub stats: ComposeStats,
}
