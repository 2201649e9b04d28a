use std::fmt;

use serde::{Deserialize, Serialize};

/// Pointer button codes. Touch input always presses `Left`.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Button {
    /// Left mouse button, button 1.
    Left,
    /// Right mouse button, button 2.
    Right,
    /// Middle mouse button, button 3.
    Middle,
}

impl Button {
    /// The numeric button id.
    pub fn id(&self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Right => 2,
            Self::Middle => 3,
        }
    }

    /// Look a button up by its numeric id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Left),
            2 => Some(Self::Right),
            3 => Some(Self::Middle),
            _ => None,
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
