//! Session-scoped mutable state.
//!
//! The session owns both the uploaded-document list and the rectangle list.
//! Ownership is one-directional: the driving layer (CLI or UI) writes, the
//! composition engine only ever borrows. State lives for the process
//! lifetime and is cleared only by explicit calls, never automatically.

use super::document::{DocumentId, SourceDocument};
use super::rect::{PixelRect, Rect, RectId, RectStyle};

/// Holds the uploaded documents and stamp rectangles for one session.
#[derive(Debug, Default)]
pub struct SessionState {
    documents: Vec<SourceDocument>,
    rects: Vec<Rect>,
    next_document_id: u64,
    next_rect_id: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an uploaded document. Documents keep upload order; that order
    /// is the page order of the composed output.
    pub fn add_document(&mut self, display_name: impl Into<String>, bytes: Vec<u8>) -> DocumentId {
        let id = DocumentId(self.next_document_id);
        self.next_document_id += 1;
        self.documents.push(SourceDocument {
            id,
            display_name: display_name.into(),
            bytes,
        });
        id
    }

    /// Removes a document by id. Returns whether anything was removed.
    pub fn remove_document(&mut self, id: DocumentId) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        self.documents.len() != before
    }

    pub fn documents(&self) -> &[SourceDocument] {
        &self.documents
    }

    /// Creates a new rectangle with a fresh unique id. Text starts empty,
    /// which signals "use the job fallback" downstream. Negative extents
    /// are clamped to zero; no other geometry validation is performed.
    pub fn add_rectangle(&mut self, bounds: PixelRect, style: RectStyle) -> RectId {
        let id = RectId(self.next_rect_id);
        self.next_rect_id += 1;
        self.rects.push(Rect {
            id,
            bounds: bounds.clamped(),
            style,
            text: String::new(),
        });
        id
    }

    /// Replaces an existing rectangle's non-geometric fields in place.
    /// Unknown ids are silently ignored — a stale id is a recoverable
    /// condition, not an error.
    pub fn update_rectangle_style(&mut self, id: RectId, style: RectStyle) {
        if let Some(rect) = self.rects.iter_mut().find(|r| r.id == id) {
            rect.style = style;
        }
    }

    /// Sets a rectangle's replacement text. An empty string reverts the
    /// rectangle to the job-level fallback. Unknown ids are ignored.
    pub fn set_rectangle_text(&mut self, id: RectId, text: impl Into<String>) {
        if let Some(rect) = self.rects.iter_mut().find(|r| r.id == id) {
            rect.text = text.into();
        }
    }

    /// Empties the rectangle list unconditionally.
    pub fn clear_rectangles(&mut self) {
        self.rects.clear();
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }
}
