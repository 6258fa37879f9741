//! Decoder results
//!
//! These types carry the semantic meaning of a decoded escape sequence,
//! independent of how the screen applies it.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Outcome of decoding one escape sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A recognized sequence; `consumed` bytes belong to it
    Apply {
        sequence: EscapeSequence,
        consumed: usize,
    },
    /// A well-formed but unsupported sequence; skip `consumed` bytes
    Ignore { consumed: usize },
    /// The sequence has not been terminated yet; retain the input
    Incomplete,
}

impl Decoded {
    /// Bytes consumed, or `None` if incomplete
    pub fn consumed(&self) -> Option<usize> {
        match self {
            Decoded::Apply { consumed, .. } | Decoded::Ignore { consumed } => Some(*consumed),
            Decoded::Incomplete => None,
        }
    }

    /// Check if this outcome needs more input
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Decoded::Incomplete)
    }
}

/// Region selector for erase-in-line and erase-in-display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EraseMode {
    /// Mode 0: from the cursor to the end
    ToEnd,
    /// Mode 1: from the start through the cursor, inclusive
    ToStart,
    /// Mode 2: everything
    All,
}

impl EraseMode {
    /// Map a numeric erase parameter, `None` for unsupported modes
    pub fn from_param(mode: u16) -> Option<Self> {
        match mode {
            0 => Some(EraseMode::ToEnd),
            1 => Some(EraseMode::ToStart),
            2 => Some(EraseMode::All),
            _ => None,
        }
    }
}

/// A recognized escape sequence with defaults already applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscapeSequence {
    /// CUU
    CursorUp(u16),
    /// CUD
    CursorDown(u16),
    /// CUF
    CursorForward(u16),
    /// CUB
    CursorBack(u16),
    /// CNL - down N rows, then column 0
    CursorNextLine(u16),
    /// CPL - up N rows, then column 0
    CursorPrevLine(u16),
    /// CHA - 1-based column
    CursorColumn(u16),
    /// CUP/HVP - 1-based row and column
    CursorPosition { row: u16, col: u16 },
    /// ED
    EraseInDisplay(EraseMode),
    /// EL
    EraseInLine(EraseMode),
    /// SGR, attributes in the order they appeared
    Sgr(Vec<SgrAttribute>),
}

/// One Select Graphic Rendition attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SgrAttribute {
    /// 0
    Reset,
    /// 1
    Bold,
    /// 2
    Dim,
    /// 4
    Underline,
    /// 22 - clears bold and dim
    NormalIntensity,
    /// 24
    NotUnderlined,
    /// 30-37, 90-97, 38;5;N, 38;2;R;G;B
    Foreground(Color),
    /// 40-47, 100-107, 48;5;N, 48;2;R;G;B
    Background(Color),
    /// 39
    DefaultForeground,
    /// 49
    DefaultBackground,
    /// Anything else; carried for logging only
    Unknown(u16),
}
