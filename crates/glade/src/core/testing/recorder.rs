use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    Identity, NodeHandle, Widget,
    error::{Error, Result},
    event::{key::Key, mouse::Button},
    geom::Point,
};

/// A handler invocation observed by a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `handle_click`.
    Click {
        /// Node the call was made for.
        identity: Identity,
        /// Local coordinates.
        location: Point,
        /// Button.
        button: Button,
    },
    /// `handle_click_up`.
    ClickUp {
        /// Node the call was made for.
        identity: Identity,
        /// Local coordinates.
        location: Point,
        /// Button.
        button: Button,
    },
    /// `handle_key`.
    Key {
        /// Node the call was made for.
        identity: Identity,
        /// Key.
        key: Key,
        /// Auto-repeat flag.
        held: bool,
    },
    /// `handle_key_up`.
    KeyUp {
        /// Node the call was made for.
        identity: Identity,
        /// Key.
        key: Key,
    },
    /// `handle_lost_focus`.
    LostFocus {
        /// Node the call was made for.
        identity: Identity,
    },
}

impl Call {
    /// The node the call was made for.
    pub fn identity(&self) -> &Identity {
        match self {
            Self::Click { identity, .. }
            | Self::ClickUp { identity, .. }
            | Self::Key { identity, .. }
            | Self::KeyUp { identity, .. }
            | Self::LostFocus { identity } => identity,
        }
    }
}

/// A widget behavior that logs every handler call. Clones share one log, so a
/// test keeps a clone and registers another.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    /// Shared call log.
    calls: Arc<Mutex<Vec<Call>>>,
    /// Every handler fails with this message after logging, if set.
    fail: Option<String>,
}

impl Recorder {
    /// A recorder with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose handlers fail after logging.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail: Some(message.into()),
            ..Default::default()
        }
    }

    /// A snapshot of the log.
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Calls made for one node.
    pub fn calls_for(&self, identity: &Identity) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.identity() == identity)
            .collect()
    }

    /// Empty the log.
    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Log a call and apply the failure mode.
    fn log(&self, node: &NodeHandle<'_>, call: Call) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        match &self.fail {
            Some(msg) => Err(Error::widget(node.tag(), msg.clone())),
            None => Ok(()),
        }
    }
}

impl Widget for Recorder {
    fn handle_click(
        &self,
        node: &mut NodeHandle<'_>,
        location: Point,
        button: Button,
    ) -> Result<()> {
        let call = Call::Click {
            identity: node.identity().clone(),
            location,
            button,
        };
        self.log(node, call)
    }

    fn handle_click_up(
        &self,
        node: &mut NodeHandle<'_>,
        location: Point,
        button: Button,
    ) -> Result<()> {
        let call = Call::ClickUp {
            identity: node.identity().clone(),
            location,
            button,
        };
        self.log(node, call)
    }

    fn handle_key(&self, node: &mut NodeHandle<'_>, key: Key, held: bool) -> Result<()> {
        let call = Call::Key {
            identity: node.identity().clone(),
            key,
            held,
        };
        self.log(node, call)
    }

    fn handle_key_up(&self, node: &mut NodeHandle<'_>, key: Key) -> Result<()> {
        let call = Call::KeyUp {
            identity: node.identity().clone(),
            key,
        };
        self.log(node, call)
    }

    fn handle_lost_focus(&self, node: &mut NodeHandle<'_>) -> Result<()> {
        let call = Call::LostFocus {
            identity: node.identity().clone(),
        };
        self.log(node, call)
    }

    fn name(&self) -> String {
        "recorder".into()
    }
}
