//! Stamp rectangle model.
//!
//! Rectangles are drawn on a preview canvas rendered at a fixed session
//! scale, so their coordinates live in preview-pixel space: origin at the
//! top-left, units of pixels. They are page-agnostic stencils — the same
//! list is applied, at the same pixel position, to every page of every
//! composed document.

use serde::Deserialize;

/// Opaque identifier for a stamp rectangle, unique within a session and
/// stable for the rectangle's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RectId(pub(crate) u64);

/// Position and size in preview-pixel space, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Clamps negative sizes to zero. Drag capture can only produce
    /// non-negative extents; zero-size rectangles are permitted and paint a
    /// zero-area cover.
    pub(crate) fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
            w: self.w.max(0.0),
            h: self.h.max(0.0),
        }
    }
}

/// Non-geometric rectangle attributes, editable after creation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RectStyle {
    /// Extra pixels of cover area on each side.
    #[serde(default)]
    pub padding: f32,
    /// Visual corner radius in preview pixels. Display-only: it shapes the
    /// on-screen overlay but is not propagated to output geometry.
    #[serde(default)]
    pub radius: f32,
    /// Point size for the replacement text.
    #[serde(default = "RectStyle::default_font_size")]
    pub font_size: f32,
    /// 6-hex-digit color value; malformed values fall back to the default
    /// color at composition time.
    #[serde(default = "RectStyle::default_color")]
    pub color: String,
}

impl RectStyle {
    fn default_font_size() -> f32 {
        12.0
    }

    fn default_color() -> String {
        "#064e3b".to_string()
    }
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            padding: 0.0,
            radius: 0.0,
            font_size: Self::default_font_size(),
            color: Self::default_color(),
        }
    }
}

/// A user-drawn stamp region: cover area plus replacement text.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub id: RectId,
    pub bounds: PixelRect,
    pub style: RectStyle,
    /// Replacement string. Empty means "use the job-level fallback".
    pub text: String,
}

impl Rect {
    /// Resolves the text to stamp for this rectangle: its own text if
    /// non-empty, else the job-level fallback. An empty result means no
    /// text is drawn and the rectangle is a bare cover.
    pub fn resolved_text<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.text.is_empty() {
            fallback
        } else {
            &self.text
        }
    }
}
