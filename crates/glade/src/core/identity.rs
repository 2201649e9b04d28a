//! Node identity paths.
//!
//! An identity is the list of sibling keys from the top of the tree down to a
//! node. Explicit keys come from the host; unkeyed nodes are keyed by their
//! position among their siblings.

use std::fmt;

/// A key distinguishing a node from its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A stable key supplied by the host.
    Explicit(String),
    /// Creation order within the parent, counting every child.
    Ordinal(usize),
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Explicit(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Explicit(s)
    }
}

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        Self::Ordinal(n)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(s) => write!(f, "{s}"),
            Self::Ordinal(n) => write!(f, "#{n}"),
        }
    }
}

/// The path of keys from the top level of the tree down to a node.
///
/// Identity is the only thing that correlates a node in one frame with a node
/// in the next. Nodes declared without explicit keys are identified by their
/// position, so unkeyed nodes created in a loop whose length or order changes
/// lose their state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity {
    /// Keys from the outermost ancestor to the node.
    keys: Vec<Key>,
}

impl Identity {
    /// The identity of the (implicit) surface the top-level nodes hang off.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build an identity from a sequence of keys.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// The identity of a child of this node.
    pub fn child(&self, key: impl Into<Key>) -> Self {
        let mut keys = self.keys.clone();
        keys.push(key.into());
        Self { keys }
    }

    /// The identity of this node's parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.keys.split_last()?;
        Some(Self {
            keys: rest.to_vec(),
        })
    }

    /// The last key of the path.
    pub fn key(&self) -> Option<&Key> {
        self.keys.last()
    }

    /// All keys of the path.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Nesting depth; top-level nodes have depth 1.
    pub fn depth(&self) -> usize {
        self.keys.len()
    }

    /// Is this the root identity?
    pub fn is_root(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "/");
        }
        for k in &self.keys {
            write!(f, "/{k}")?;
        }
        Ok(())
    }
}
