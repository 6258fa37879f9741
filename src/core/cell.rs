//! Terminal Cell
//!
//! Represents a single cell in the terminal grid, containing a character
//! and the pen it was written with.

use serde::{Deserialize, Serialize};

use super::pen::Pen;

/// Fixed palette for the 16 ANSI colors
const ANSI_PALETTE: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00), // Black
    (0xcc, 0x00, 0x00), // Red
    (0x00, 0xcc, 0x00), // Green
    (0xcc, 0xcc, 0x00), // Yellow
    (0x00, 0x00, 0xcc), // Blue
    (0xcc, 0x00, 0xcc), // Magenta
    (0x00, 0xcc, 0xcc), // Cyan
    (0xcc, 0xcc, 0xcc), // White
    (0x55, 0x55, 0x55), // Bright Black
    (0xff, 0x55, 0x55), // Bright Red
    (0x55, 0xff, 0x55), // Bright Green
    (0xff, 0xff, 0x55), // Bright Yellow
    (0x55, 0x55, 0xff), // Bright Blue
    (0xff, 0x55, 0xff), // Bright Magenta
    (0x55, 0xff, 0xff), // Bright Cyan
    (0xff, 0xff, 0xff), // Bright White
];

/// Color reference held by a cell or the pen.
///
/// The "default" color is expressed as `None` wherever a `Color` is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Color {
    /// 256-color palette entry (0-15 are the ANSI colors)
    Indexed { index: u8 },
    /// 24-bit RGB color
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const BLACK: Color = Color::Indexed { index: 0 };
    pub const RED: Color = Color::Indexed { index: 1 };
    pub const GREEN: Color = Color::Indexed { index: 2 };
    pub const YELLOW: Color = Color::Indexed { index: 3 };
    pub const BLUE: Color = Color::Indexed { index: 4 };
    pub const MAGENTA: Color = Color::Indexed { index: 5 };
    pub const CYAN: Color = Color::Indexed { index: 6 };
    pub const WHITE: Color = Color::Indexed { index: 7 };

    /// Palette entry `index`
    pub const fn indexed(index: u8) -> Self {
        Color::Indexed { index }
    }

    /// True color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Convert a 256-color index to RGB.
    ///
    /// 0-15 use the fixed demo palette, 16-231 the xterm color cube and
    /// 232-255 the grayscale ramp.
    pub fn indexed_to_rgb(index: u8) -> (u8, u8, u8) {
        match index {
            0..=15 => ANSI_PALETTE[index as usize],
            16..=231 => {
                let n = index - 16;
                let r = n / 36;
                let g = (n % 36) / 6;
                let b = n % 6;
                let to_rgb = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
                (to_rgb(r), to_rgb(g), to_rgb(b))
            }
            232..=255 => {
                let gray = 8 + (index - 232) * 10;
                (gray, gray, gray)
            }
        }
    }

    /// Resolve this color to RGB
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match *self {
            Color::Indexed { index } => Self::indexed_to_rgb(index),
            Color::Rgb { r, g, b } => (r, g, b),
        }
    }

    /// Resolve this color to a `#rrggbb` string
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// A single cell in the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledCell {
    /// The character in this cell
    pub ch: char,
    /// Foreground color (`None` = terminal default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    /// Background color (`None` = terminal default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub dim: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Default for StyledCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
            dim: false,
            underline: false,
        }
    }
}

impl StyledCell {
    /// Create an unstyled cell holding `ch`
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            ..Default::default()
        }
    }

    /// Create a cell holding `ch`, styled with a copy of `pen`
    pub fn with_pen(ch: char, pen: &Pen) -> Self {
        Self {
            ch,
            fg: pen.fg,
            bg: pen.bg,
            bold: pen.bold,
            dim: pen.dim,
            underline: pen.underline,
        }
    }

    /// The pen this cell was written with
    pub fn pen(&self) -> Pen {
        Pen {
            fg: self.fg,
            bg: self.bg,
            bold: self.bold,
            dim: self.dim,
            underline: self.underline,
        }
    }

    /// Check if this cell is indistinguishable from a fresh blank cell
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
