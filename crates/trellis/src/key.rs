//! Keystrokes, as bound to view commands.
//!
//! Keys are built by adding a key code to a modifier set: `Ctrl + 'q'`,
//! `(Shift | Alt) + KeyCode::Up`. A bare `char` or [`KeyCode`] converts to a
//! key with no modifiers.

use std::ops::{Add, BitOr};

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is held.
    pub shift: bool,
    /// Control is held.
    pub ctrl: bool,
    /// Alt is held.
    pub alt: bool,
}

impl Mods {
    /// No modifiers.
    pub const NONE: Self = Self::new(false, false, false);

    /// A modifier set.
    pub const fn new(shift: bool, ctrl: bool, alt: bool) -> Self {
        Self { shift, ctrl, alt }
    }
}

impl BitOr for Mods {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self::new(
            self.shift || other.shift,
            self.ctrl || other.ctrl,
            self.alt || other.alt,
        )
    }
}

impl<T: Into<KeyCode>> Add<T> for Mods {
    type Output = Key;

    fn add(self, code: T) -> Key {
        Key {
            mods: self,
            key: code.into(),
        }
    }
}

/// Shift held.
#[allow(non_upper_case_globals)]
pub const Shift: Mods = Mods::new(true, false, false);

/// Control held.
#[allow(non_upper_case_globals)]
pub const Ctrl: Mods = Mods::new(false, true, false);

/// Alt held.
#[allow(non_upper_case_globals)]
pub const Alt: Mods = Mods::new(false, false, true);

/// Key codes the terminal backend reports.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum KeyCode {
    /// Backspace.
    Backspace,
    /// Enter.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Tab.
    Tab,
    /// Shift-tab, as terminals report it.
    BackTab,
    /// Delete.
    Delete,
    /// Insert.
    Insert,
    /// Escape.
    Esc,
    /// Function key; `F(1)` is F1.
    F(u8),
    /// A printable character.
    Char(char),
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// A key code with modifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    /// Modifiers held.
    pub mods: Mods,
    /// The key.
    pub key: KeyCode,
}

impl Key {
    /// The form used for binding lookup. Shift with a character is folded into
    /// the character itself, so `Shift + 'a'` and `'A'` name the same key.
    /// Shift with space, or with any non-character key, is kept.
    pub fn normalize(&self) -> Self {
        match self.key {
            KeyCode::Char(c) if self.mods.shift && c != ' ' => Self {
                mods: Mods {
                    shift: false,
                    ..self.mods
                },
                key: KeyCode::Char(c.to_ascii_uppercase()),
            },
            _ => *self,
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Mods::NONE + code
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Mods::NONE + c
    }
}
