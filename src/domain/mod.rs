//! Domain models: stamp rectangles, uploaded documents, session state.
//!
//! Everything in this module is preview-side: rectangle geometry is in
//! preview-pixel space and knows nothing about PDF points. The mapping into
//! page space lives in [`crate::compose`].

pub mod color;
pub mod document;
pub mod rect;
pub mod session;

pub use color::Rgb;
pub use document::{DocumentId, SourceDocument};
pub use rect::{PixelRect, Rect, RectId, RectStyle};
pub use session::SessionState;
