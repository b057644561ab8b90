//! Stamp color handling.
//!
//! Rectangle colors arrive as user-supplied hex strings. Parsing never
//! fails: anything that is not a 6-hex-digit value (with or without a
//! leading `#`) resolves to a fixed default so a bad color cannot abort a
//! composition job.

use once_cell::sync::Lazy;
use regex::Regex;

/// A color as normalized `[0, 1]` RGB components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Default stamp text color (dark green), used whenever a rectangle's
    /// hex string is missing or malformed.
    pub const DEFAULT: Rgb = Rgb {
        r: 0.1,
        g: 0.4,
        b: 0.3,
    };

    /// Opaque white, used for cover fills.
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Returns the regex accepting exactly six hex digits, optionally
    /// prefixed with `#`.
    fn hex_pattern() -> &'static Regex {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").expect("valid hex color regex"));
        &PATTERN
    }

    /// Parses a hex color string such as `#064e3b` or `064E3B`.
    ///
    /// Invalid input (wrong length, non-hex digits, empty string) yields
    /// [`Rgb::DEFAULT`] rather than an error.
    pub fn parse_hex(hex: &str) -> Rgb {
        let digits = match Self::hex_pattern().captures(hex) {
            Some(caps) => match caps.get(1) {
                Some(m) => m.as_str(),
                None => return Rgb::DEFAULT,
            },
            None => return Rgb::DEFAULT,
        };

        match u32::from_str_radix(digits, 16) {
            Ok(value) => {
                let r = ((value >> 16) & 0xff) as f32 / 255.0;
                let g = ((value >> 8) & 0xff) as f32 / 255.0;
                let b = (value & 0xff) as f32 / 255.0;
                Rgb { r, g, b }
            }
            Err(_) => Rgb::DEFAULT,
        }
    }
}
