//! The current pen (SGR state)
//!
//! Everything written to the grid is styled with a copy of the pen taken
//! at write time.

use serde::{Deserialize, Serialize};

use super::cell::Color;
use crate::parser::SgrAttribute;

/// Current foreground/background/attribute state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pen {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
}

impl Pen {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if the pen is in its default state
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Apply one SGR attribute
    pub fn apply(&mut self, attr: SgrAttribute) {
        match attr {
            SgrAttribute::Reset => self.reset(),
            SgrAttribute::Bold => self.bold = true,
            SgrAttribute::Dim => self.dim = true,
            SgrAttribute::Underline => self.underline = true,
            SgrAttribute::NormalIntensity => {
                self.bold = false;
                self.dim = false;
            }
            SgrAttribute::NotUnderlined => self.underline = false,
            SgrAttribute::Foreground(color) => self.fg = Some(color),
            SgrAttribute::Background(color) => self.bg = Some(color),
            SgrAttribute::DefaultForeground => self.fg = None,
            SgrAttribute::DefaultBackground => self.bg = None,
            SgrAttribute::Unknown(code) => {
                tracing::debug!("Unknown SGR parameter: {}", code);
            }
        }
    }

    /// Apply a full SGR attribute list in order
    pub fn apply_all(&mut self, attrs: &[SgrAttribute]) {
        for &attr in attrs {
            self.apply(attr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pen_apply_flags() {
        let mut pen = Pen::default();
        pen.apply_all(&[
            SgrAttribute::Bold,
            SgrAttribute::Dim,
            SgrAttribute::Underline,
        ]);
        assert!(pen.bold && pen.dim && pen.underline);

        pen.apply(SgrAttribute::NormalIntensity);
        assert!(!pen.bold);
        assert!(!pen.dim);
        assert!(pen.underline);

        pen.apply(SgrAttribute::NotUnderlined);
        assert!(pen.is_default());
    }

    #[test]
    fn test_pen_colors_and_defaults() {
        let mut pen = Pen::default();
        pen.apply(SgrAttribute::Foreground(Color::GREEN));
        pen.apply(SgrAttribute::Background(Color::rgb(1, 2, 3)));
        assert_eq!(pen.fg, Some(Color::GREEN));
        assert_eq!(pen.bg, Some(Color::rgb(1, 2, 3)));

        pen.apply(SgrAttribute::DefaultForeground);
        assert_eq!(pen.fg, None);
        assert_eq!(pen.bg, Some(Color::rgb(1, 2, 3)));

        pen.apply(SgrAttribute::DefaultBackground);
        assert!(pen.is_default());
    }

    #[test]
    fn test_pen_reset_is_total() {
        let mut pen = Pen {
            fg: Some(Color::RED),
            bg: Some(Color::BLUE),
            bold: true,
            dim: true,
            underline: true,
        };
        pen.apply(SgrAttribute::Reset);
        assert!(pen.is_default());
    }

    #[test]
    fn test_pen_unknown_is_noop() {
        let mut pen = Pen {
            bold: true,
            ..Default::default()
        };
        pen.apply(SgrAttribute::Unknown(7));
        assert!(pen.bold);
        assert_eq!(pen.fg, None);
    }
}
