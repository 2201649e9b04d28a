use std::{fmt, str::FromStr};

use convert_case::{Case, Casing};

use crate::{error, error::Result};

/// Return true if the character is valid in a type tag.
pub fn valid_tag_char(c: char) -> bool {
    (c.is_ascii_lowercase() || c.is_ascii_digit()) || c == '_'
}

/// The type tag of a node, which consists of lowercase ASCII alphanumeric
/// characters, plus underscores. Tags select the widget behavior a node is
/// dispatched to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag {
    /// Stored tag string.
    name: String,
}

impl TypeTag {
    /// Normalize a string into a tag by converting it to snake case and
    /// dropping invalid characters. A string with nothing left after
    /// normalization is an error.
    pub fn new(name: &str) -> Result<Self> {
        let raw = name.to_case(Case::Snake);
        let filtered: String = raw.chars().filter(|x| valid_tag_char(*x)).collect();
        if filtered.is_empty() {
            return Err(error::Error::Invalid(format!("type tag {name:?}")));
        }
        Ok(Self { name: filtered })
    }

    /// A tag from a literal already in normal form.
    pub(crate) fn known(name: &'static str) -> Self {
        debug_assert!(!name.is_empty() && name.chars().all(valid_tag_char));
        Self {
            name: name.to_string(),
        }
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl FromStr for TypeTag {
    type Err = error::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for TypeTag {
    type Error = error::Error;
    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq<&str> for TypeTag {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl PartialEq<str> for TypeTag {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_tag_char_is_ascii() {
        assert!(valid_tag_char('a'));
        assert!(valid_tag_char('0'));
        assert!(valid_tag_char('_'));
        assert!(!valid_tag_char('A'));
        assert!(!valid_tag_char('-'));
    }

    #[test]
    fn tag_convert() -> Result<()> {
        assert_eq!(TypeTag::new("button")?, "button");
        assert_eq!(TypeTag::new("TextInput")?, "text_input");
        assert_eq!(TypeTag::new("text input")?, "text_input");
        assert!(TypeTag::new("").is_err());
        assert!(TypeTag::new("!!!").is_err());
        Ok(())
    }
}
