//! WebDriver key code points.
//!
//! Keys are sent as private-use characters inside the text of a send-keys
//! command. Modifiers stay pressed until `Key::Null` releases them.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Null,
    Backspace,
    Tab,
    Enter,
    Shift,
    Delete,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
}

impl Key {
    pub const fn code_point(self) -> char {
        match self {
            Key::Null => '\u{E000}',
            Key::Backspace => '\u{E003}',
            Key::Tab => '\u{E004}',
            Key::Enter => '\u{E007}',
            Key::Shift => '\u{E008}',
            Key::Delete => '\u{E017}',
            Key::ArrowLeft => '\u{E012}',
            Key::ArrowUp => '\u{E013}',
            Key::ArrowRight => '\u{E014}',
            Key::ArrowDown => '\u{E015}',
        }
    }

    /// Inverse of `code_point`.
    pub fn from_code_point(c: char) -> Option<Self> {
        [
            Key::Null,
            Key::Backspace,
            Key::Tab,
            Key::Enter,
            Key::Shift,
            Key::Delete,
            Key::ArrowLeft,
            Key::ArrowUp,
            Key::ArrowRight,
            Key::ArrowDown,
        ]
        .into_iter()
        .find(|key| key.code_point() == c)
    }

    /// `n` presses of this key.
    pub fn repeat(self, n: usize) -> String {
        std::iter::repeat(self.code_point()).take(n).collect()
    }
}

impl From<Key> for char {
    fn from(key: Key) -> char {
        key.code_point()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code_point())
    }
}

/// `key` pressed while `modifier` is held, with the modifier released afterwards.
pub fn chord(modifier: Key, key: Key) -> String {
    [modifier, key, Key::Null]
        .into_iter()
        .map(Key::code_point)
        .collect()
}

pub fn shift_tab() -> String {
    chord(Key::Shift, Key::Tab)
}

/// Enough backspaces to erase `text` from the end of a field.
pub fn backspaces(text: &str) -> String {
    Key::Backspace.repeat(text.chars().count())
}
