//! Cell attributes. There is no theming layer: every view carries one
//! resolved [`Attribute`].

use serde::{Deserialize, Serialize};

/// Terminal colors.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
    Rgb {
        r: u8,
        g: u8,
        b: u8,
    },
    /// An ANSI 256-color palette index.
    AnsiValue(u8),
}

/// A set of active text attributes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash, Serialize, Deserialize)]
pub struct AttrSet {
    /// Bold.
    pub bold: bool,
    /// Dim.
    pub dim: bool,
    /// Italic.
    pub italic: bool,
    /// Underline.
    pub underline: bool,
}

impl AttrSet {
    /// Is this attribute set empty?
    pub fn is_empty(&self) -> bool {
        !(self.bold || self.dim || self.italic || self.underline)
    }
}

/// A resolved cell attribute: colors plus text attributes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Text attributes.
    pub attrs: AttrSet,
}

impl Attribute {
    /// An attribute with the given colors and no text attributes.
    pub fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: AttrSet::default(),
        }
    }

    /// The same colors with bold turned on.
    pub fn bold(mut self) -> Self {
        self.attrs.bold = true;
        self
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::new(Color::White, Color::Black)
    }
}
