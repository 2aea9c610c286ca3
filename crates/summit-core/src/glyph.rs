//! The [`Glyph`] type: one styled character on screen.

use crate::style::Style;

/// A styled character occupying one screen position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    /// A glyph showing `ch` with the default style.
    #[inline]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            style: Style::DEFAULT,
        }
    }

    /// Set the style (builder).
    #[inline]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self::new(' ')
    }
}
