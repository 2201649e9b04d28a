use crate::{
    Identity, NodeId, TypeTag,
    event::mouse::Button,
    props::{Props, Value},
};

/// A node in the store arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// The identity this node was declared under.
    pub(crate) identity: Identity,
    /// Parent node, or `None` for top-level nodes.
    pub(crate) parent: Option<NodeId>,
    /// Children in declaration order.
    pub(crate) children: Vec<NodeId>,
    /// The persistent props record.
    pub(crate) props: Props,
}

impl Node {
    /// The node's identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Parent node id.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child node ids in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The props record.
    pub fn props(&self) -> &Props {
        &self.props
    }
}

/// Mutable access to a single node, handed to widget behaviors.
///
/// A handle exposes the node's own record only. The declared fields are read
/// only; behaviors may change focus, memory and signals.
#[derive(Debug)]
pub struct NodeHandle<'a> {
    /// Node id.
    pub(crate) id: NodeId,
    /// Node identity.
    pub(crate) identity: &'a Identity,
    /// The node's record.
    pub(crate) props: &'a mut Props,
}

impl NodeHandle<'_> {
    /// The node id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node identity.
    pub fn identity(&self) -> &Identity {
        self.identity
    }

    /// The props record.
    pub fn props(&self) -> &Props {
        self.props
    }

    /// The widget type tag.
    pub fn tag(&self) -> &TypeTag {
        &self.props.tag
    }

    /// Does the node hold focus?
    pub fn focused(&self) -> bool {
        self.props.focused
    }

    /// Take or release focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.props.focused = focused;
    }

    /// The button held down on this node.
    pub fn pressed(&self) -> Option<Button> {
        self.props.pressed
    }

    /// A declared attribute.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.props.attrs.get(name)
    }

    /// A declared boolean attribute, false when absent or of another type.
    pub fn attr_bool(&self, name: &str) -> bool {
        self.attr(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// A declared text attribute.
    pub fn attr_text(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(Value::as_text)
    }

    /// A value from widget memory.
    pub fn memory(&self, name: &str) -> Option<&Value> {
        self.props.memory.get(name)
    }

    /// A boolean from widget memory, false when absent.
    pub fn memory_bool(&self, name: &str) -> bool {
        self.memory(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Text from widget memory.
    pub fn memory_text(&self, name: &str) -> Option<&str> {
        self.memory(name).and_then(Value::as_text)
    }

    /// Store a value in widget memory.
    pub fn set_memory(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.props.memory.insert(name.into(), value.into());
    }

    /// Remove a value from widget memory.
    pub fn clear_memory(&mut self, name: &str) -> Option<Value> {
        self.props.memory.remove(name)
    }

    /// Emit a signal for the host to observe while building the next frame.
    pub fn emit(&mut self, signal: impl Into<String>) {
        self.props.signals.push(signal.into());
    }
}
