use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::{NodeId, geom};

/// Result type for Glade operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// Two siblings were declared with the same identity in one frame.
    #[error("duplicate identity: {identity}")]
    DuplicateIdentity {
        /// The contested identity.
        identity: String,
    },

    /// A node's type tag has no registered behavior.
    #[error("unknown widget type: {0}")]
    UnknownWidgetType(String),

    /// Dispatch was attempted against geometry from another generation.
    #[error("stale render tree: store generation {store}, render generation {render}")]
    StaleRenderTree {
        /// Current store generation.
        store: u64,
        /// Generation the render tree was computed from.
        render: u64,
    },

    /// A widget behavior returned an error.
    #[error("widget {tag}: {message}")]
    Widget {
        /// Tag of the failing node.
        tag: String,
        /// Error message.
        message: String,
    },

    /// A node lookup failed.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("layout: {0}")]
    /// Layout failure.
    Layout(String),
    #[error("backend: {0}")]
    /// Event source or terminal failure.
    Backend(String),
    #[error("config: {0}")]
    /// Configuration could not be read.
    Config(String),
    #[error("invalid: {0}")]
    /// Invalid input error.
    Invalid(String),
    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}

impl Error {
    /// Construct a widget error.
    pub fn widget(tag: impl ToString, message: impl Into<String>) -> Self {
        Self::Widget {
            tag: tag.to_string(),
            message: message.into(),
        }
    }
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
