//! PDF cover-and-replace stamping library.
//!
//! This library merges a set of uploaded PDF documents into one output and
//! stamps user-drawn redaction rectangles onto every page: each rectangle
//! is covered with an opaque white fill and overlaid with replacement
//! text, mapped from preview-pixel coordinates back into PDF-point space.
//!
//! # Features
//!
//! - **Multi-document merge**: pages concatenated in upload order, content
//!   and size preserved
//! - **Coordinate mapping**: preview-pixel rectangles (top-left origin)
//!   transformed into PDF points (bottom-left origin) at the session's
//!   preview scale
//! - **Cover + replace**: opaque white cover inflated by per-rectangle
//!   padding, replacement text with per-rectangle font size and color
//! - **Fallback text**: a job-level replacement string fills any rectangle
//!   whose own text is unset
//!
//! # Architecture
//!
//! - [`domain`]: rectangle model, uploaded documents, session state
//! - [`compose`]: merge, coordinate transform, page stamping, serialization
//! - [`error`]: error taxonomy
//!
//! # Quick Start
//!
//! ```no_run
//! use overstamp::{
//!     ComposeService, CompositionJob, PixelRect, RectStyle, SessionState,
//!     DEFAULT_PREVIEW_SCALE,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = SessionState::new();
//! session.add_document("report.pdf", std::fs::read("report.pdf")?);
//!
//! let id = session.add_rectangle(
//!     PixelRect::new(60.0, 36.0, 120.0, 24.0),
//!     RectStyle::default(),
//! );
//! session.set_rectangle_text(id, "REDACTED");
//!
//! let job = CompositionJob::from_session(&session, "", DEFAULT_PREVIEW_SCALE);
//! let composed = ComposeService::new().compose(&job)?;
//! std::fs::write("merged-replaced.pdf", &composed.bytes)?;
//! # Ok(())
//! # }
//! ```

// Public API
pub mod compose;
pub mod domain;
pub mod error;

// Re-exports for convenient access
pub use compose::{
    Composed, ComposeService, ComposeStats, CompositionJob, PointRect, PreviewTransform,
    DEFAULT_OUTPUT_NAME, DEFAULT_PREVIEW_SCALE,
};
pub use domain::{
    DocumentId, PixelRect, Rect, RectId, RectStyle, Rgb, SessionState, SourceDocument,
};
pub use error::{OverstampError, OverstampResult};
