use std::fmt;

use crate::foundation::error::GlitchError;

pub use kurbo::{Point, Rect, Vec2};

/// Opaque handle to a displayable raster image (URL, data URI or path).
///
/// The engine never looks inside; it only forwards the reference to layers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap a reference as-is.
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    /// Wrap a reference, treating blank strings as absent.
    pub fn non_empty(src: impl Into<String>) -> Option<Self> {
        let src = src.into();
        if src.trim().is_empty() {
            None
        } else {
            Some(Self(src))
        }
    }

    /// Raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for an empty or whitespace-only reference.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque sRGB color, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = GlitchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
            .ok_or_else(|| GlitchError::validation(format!("invalid hex color '{value}'")))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// Axis-aligned rectangle in percent of the container.
///
/// All placement math happens in these units so the engine never needs to
/// know the pixel size of the surface it is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PctRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PctRect {
    /// The whole container.
    pub const FULL: Self = Self::new(0.0, 0.0, 100.0, 100.0);

    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A `width`×`height` rectangle centered in the container.
    pub fn centered(width: f64, height: f64) -> Self {
        Self::new((100.0 - width) / 2.0, (100.0 - height) / 2.0, width, height)
    }

    pub fn right(self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// `true` when `other` lies entirely inside `self` (edges inclusive).
    pub fn contains_rect(self, other: Self) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn is_finite(self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.left, self.top, self.right(), self.bottom())
    }
}

/// Horizontal clip band: `inset(top% 0 bottom% 0)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipInset {
    pub top: f64,
    pub bottom: f64,
}

impl ClipInset {
    pub const fn band(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn to_css(self) -> String {
        format!("inset({}% 0 {}% 0)", self.top, self.bottom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
