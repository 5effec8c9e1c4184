//! Parameter types for image operations.
//!
//! These types describe *where* and *how* something is placed, never the
//! pixels themselves. They are shared by the pure [`calculations`](super::calculations)
//! and by the pixel-level [`operations`](super::operations).
//!
//! ## Types
//!
//! - [`Focus`]: which part of an over-tall image survives a cover crop.
//! - [`Anchor`]: where a scaled overlay (the product) sits in its container.
//! - [`Corner`]: logo placement, one of the four corners.
//! - [`TextPosition`]: text pill placement as a vertical + horizontal keyword pair.
//! - [`Rgb`]: an opaque color parsed from `#RRGGBB`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vertical crop focus for a cover crop. Horizontal crops are always centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    Top,
    Bottom,
    #[default]
    Center,
}

/// Placement of a scaled overlay within its container.
///
/// | Anchor | x | y |
/// |---|---|---|
/// | `Center` | centered | centered |
/// | `CenterBottom` | centered | 8% of height above the bottom edge |
/// | `Left` | 10% of width from the left | 8% of height above the bottom edge |
/// | `Right` | 10% of width from the right | 8% of height above the bottom edge |
///
/// All positions are clamped into the container afterwards.
///
/// `Center` is the product anchor and is centred on both axes, not raised
/// off the bottom edge: the CTA sits below an estimated product bottom at
/// `70%` of the height, which only holds for a vertically centred product.
/// Bottom-offset placement is `CenterBottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    #[default]
    Center,
    CenterBottom,
    Left,
    Right,
}

/// One of the four image corners, used for logo placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Text pill placement: a vertical and a horizontal keyword.
///
/// Parsed leniently from strings like `top-left`, `bottom-center`,
/// `center`, `right`: a missing keyword means centered on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextPosition {
    pub vertical: VAlign,
    pub horizontal: HAlign,
}

impl TextPosition {
    pub const fn new(vertical: VAlign, horizontal: HAlign) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::new(VAlign::Top, HAlign::Left)
    }
}

impl FromStr for TextPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut vertical = VAlign::Center;
        let mut horizontal = HAlign::Center;
        let normalized = s.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err("text position must not be empty".into());
        }
        for word in normalized.split(['-', '_', ' ']) {
            match word {
                "top" => vertical = VAlign::Top,
                "bottom" => vertical = VAlign::Bottom,
                "left" => horizontal = HAlign::Left,
                "right" => horizontal = HAlign::Right,
                "center" | "middle" | "" => {}
                other => return Err(format!("unknown text position keyword '{other}' in '{s}'")),
            }
        }
        Ok(Self::new(vertical, horizontal))
    }
}

impl TryFrom<String> for TextPosition {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.vertical {
            VAlign::Top => "top",
            VAlign::Center => "center",
            VAlign::Bottom => "bottom",
        };
        let h = match self.horizontal {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        };
        if self.vertical == VAlign::Center && self.horizontal == HAlign::Center {
            f.write_str("center")
        } else {
            write!(f, "{v}-{h}")
        }
    }
}

impl From<TextPosition> for String {
    fn from(value: TextPosition) -> Self {
        value.to_string()
    }
}

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// RGBA pixel with the given alpha.
    pub fn with_alpha(self, alpha: u8) -> image::Rgba<u8> {
        let [r, g, b] = self.0;
        image::Rgba([r, g, b, alpha])
    }
}

/// Convert an opacity in `[0, 1]` to an 8-bit alpha value.
pub fn opacity_to_alpha(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0) as u8
}
