//! Keystrokes as the dispatcher hands them to widget behaviors.

/// Which modifier keys were held with a keystroke.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift.
    pub shift: bool,
    /// Control.
    pub ctrl: bool,
    /// Alt or meta.
    pub alt: bool,
}

impl Mods {
    /// No modifier held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Control only.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Is any modifier held?
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }

    /// Is a modifier held that turns a character into a command chord?
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt
    }
}

/// The key that was struck.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum KeyCode {
    /// A character key.
    Char(char),
    /// Function key `F(n)`.
    F(u8),
    /// Enter or return.
    Enter,
    /// Escape.
    Esc,
    /// Tab.
    Tab,
    /// Shift-tab, as terminals report it.
    BackTab,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Insert.
    Insert,
    /// Cursor left.
    Left,
    /// Cursor right.
    Right,
    /// Cursor up.
    Up,
    /// Cursor down.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// A key the source reported but glade has no code for.
    Null,
}

/// One keystroke: a code plus the modifiers held with it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    /// Modifiers held.
    pub mods: Mods,
    /// The key struck.
    pub key: KeyCode,
}

impl Key {
    /// A keystroke with modifiers.
    pub fn new(mods: Mods, key: KeyCode) -> Self {
        Self { mods, key }
    }

    /// A control chord on a character, like ctrl-c.
    pub fn ctrl(c: char) -> Self {
        Self::new(Mods::CTRL, KeyCode::Char(c))
    }

    /// The character this keystroke types into a text field, if any. Control
    /// and alt chords type nothing; shift is already folded into the
    /// character.
    pub fn printable(&self) -> Option<char> {
        match self.key {
            KeyCode::Char(c) if !self.mods.is_chord() && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

/// A bare key code matches only a keystroke without modifiers.
impl PartialEq<KeyCode> for Key {
    fn eq(&self, code: &KeyCode) -> bool {
        !self.mods.any() && self.key == *code
    }
}

/// A character matches the unmodified keystroke typing it.
impl PartialEq<char> for Key {
    fn eq(&self, c: &char) -> bool {
        *self == KeyCode::Char(*c)
    }
}

impl From<KeyCode> for Key {
    fn from(key: KeyCode) -> Self {
        Self::new(Mods::NONE, key)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        KeyCode::Char(c).into()
    }
}
