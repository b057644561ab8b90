//! Preview-pixel to PDF-point coordinate mapping.
//!
//! # Coordinate systems
//!
//! Rectangles are captured against a preview canvas rendered at a fixed
//! session scale: **top-left origin**, units of pixels, where the canvas for
//! a page measures `page_width * scale` by `page_height * scale`. PDF pages
//! use a **bottom-left origin** with units of points (1/72 inch). The
//! conversion is:
//!
//! ```text
//! x_pdf = x_px / scale
//! y_pdf = page_height - (y_px + h_px) / scale
//! ```
//!
//! The point-per-pixel factor is `1 / scale` regardless of the page's
//! actual size. Rectangle pixel coordinates are assumed to have been
//! captured against a preview rendered at exactly the target page's own
//! size, which only holds when all composed pages share the native size of
//! the page used during drawing. Mixed-size documents therefore receive the
//! stamp at the same point offsets on every page; this matches the original
//! behavior and is kept for compatibility.

use crate::domain::PixelRect;
use crate::error::{OverstampError, OverstampResult};

/// A rectangle in PDF-point space, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl PointRect {
    /// Grows the rectangle by `margin` points on every side. A negative
    /// margin shrinks it; callers only pass non-negative padding.
    pub fn inflated(&self, margin: f32) -> PointRect {
        PointRect {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + 2.0 * margin,
            h: self.h + 2.0 * margin,
        }
    }
}

/// Maps between preview-pixel space and PDF-point space for one session.
///
/// The scale is the factor the preview was rendered at (e.g. 1.2 means the
/// canvas was 20% larger than the page in points) and is shared by every
/// rectangle in the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewTransform {
    scale: f32,
}

impl PreviewTransform {
    /// Creates a transform for the given preview scale. The scale must be
    /// positive; zero or negative values cannot describe a rendered canvas.
    pub fn new(scale: f32) -> OverstampResult<Self> {
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(OverstampError::InvalidInput {
                parameter: "preview_scale".to_string(),
                reason: format!("must be a positive finite number, got {}", scale),
            });
        }
        Ok(Self { scale })
    }

    /// Points per preview pixel.
    pub fn point_per_pixel(&self) -> f32 {
        1.0 / self.scale
    }

    /// Maps a preview-pixel rectangle onto a page of the given height in
    /// points, flipping from top-left to bottom-left origin.
    pub fn to_points(&self, rect: &PixelRect, page_height: f32) -> PointRect {
        let s = self.point_per_pixel();
        PointRect {
            x: rect.x * s,
            y: page_height - (rect.y + rect.h) * s,
            w: rect.w * s,
            h: rect.h * s,
        }
    }

    /// Inverse of [`to_points`](Self::to_points): recovers the pixel
    /// rectangle from page geometry. Used to verify round-trip fidelity.
    pub fn to_pixels(&self, rect: &PointRect, page_height: f32) -> PixelRect {
        let s = self.scale;
        PixelRect {
            x: rect.x * s,
            y: (page_height - rect.y - rect.h) * s,
            w: rect.w * s,
            h: rect.h * s,
        }
    }
}

/// Position for a stamp's replacement text within its mapped rectangle.
///
/// Vertical placement is the approximate center (`center - font_size / 2`);
/// horizontally the text's left edge sits at the rectangle's midpoint.
/// True centering would require measuring rendered text width against the
/// chosen font, which this tool does not do.
pub fn text_anchor(rect: &PointRect, font_size: f32) -> (f32, f32) {
    let x = rect.x + rect.w / 2.0;
    let y = rect.y + rect.h / 2.0 - font_size / 2.0;
    (x, y)
}
