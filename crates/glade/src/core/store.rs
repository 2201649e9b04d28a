//! Persistent node storage.
//!
//! The store keeps one node per identity across frames. A frame declared
//! through a [`Builder`](crate::Builder) is committed in one pass that reuses
//! surviving nodes and frees the rest.

use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::debug;

use super::builder::Declared;
use crate::{
    Builder, Identity, NodeHandle, NodeId,
    error::{Error, Result},
    node::Node,
    props::Props,
};

/// Persistent node storage.
///
/// The store holds one node per declared identity. Each successful frame
/// commits a new generation: nodes whose identity was declared again keep
/// their id and interaction state, new identities get fresh nodes and
/// identities that were not declared are dropped.
#[derive(Debug, Default)]
pub struct NodeStore {
    /// Node arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Identity index over the arena.
    pub(crate) index: HashMap<Identity, NodeId>,
    /// Top-level nodes in declaration order.
    pub(crate) roots: Vec<NodeId>,
    /// Every node in pre-order.
    pub(crate) order: Vec<NodeId>,
    /// Number of committed frames.
    pub(crate) generation: u64,
}

impl NodeStore {
    /// An empty store at generation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of frames committed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in declaration order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Every node in pre-order: parents before children, siblings in
    /// declaration order.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node, failing if it does not exist.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// A node's props record.
    pub fn props(&self, id: NodeId) -> Result<&Props> {
        Ok(&self.node(id)?.props)
    }

    /// A node's children.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// Resolve an identity to a node id.
    pub fn lookup(&self, identity: &Identity) -> Option<NodeId> {
        self.index.get(identity).copied()
    }

    /// The props record for an identity.
    pub fn find(&self, identity: &Identity) -> Option<&Props> {
        self.lookup(identity)
            .and_then(|id| self.nodes.get(id))
            .map(|n| &n.props)
    }

    /// A mutable handle on a single node.
    pub fn handle(&mut self, id: NodeId) -> Result<NodeHandle<'_>> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        Ok(NodeHandle {
            id,
            identity: &node.identity,
            props: &mut node.props,
        })
    }

    /// Run a build closure against this store and commit the result as a new
    /// generation. If the closure or any builder call fails the store is left
    /// exactly as it was.
    pub fn rebuild<F>(&mut self, build: F) -> Result<()>
    where
        F: FnOnce(&mut Builder<'_>) -> Result<()>,
    {
        let declared = {
            let mut b = Builder::new(self);
            let ret = build(&mut b);
            b.finish(ret)?
        };
        self.commit(declared);
        Ok(())
    }

    /// Apply a frame's declarations. Declarations arrive in pre-order and
    /// refer to their parent by position in the list.
    pub(crate) fn commit(&mut self, declared: Vec<Declared>) {
        let mut index = HashMap::with_capacity(declared.len());
        let mut order: Vec<NodeId> = Vec::with_capacity(declared.len());
        let mut roots = Vec::new();
        let mut created = 0;

        for d in declared {
            let parent = d.parent.and_then(|i| order.get(i).copied());
            let existing = self
                .index
                .remove(&d.identity)
                .filter(|id| self.nodes.contains_key(*id));
            let id = match existing {
                Some(id) => {
                    if let Some(node) = self.nodes.get_mut(id) {
                        node.props.refresh(d.tag, d.attrs, d.layout);
                        node.parent = parent;
                        node.children.clear();
                    }
                    id
                }
                None => {
                    created += 1;
                    self.nodes.insert(Node {
                        identity: d.identity.clone(),
                        parent,
                        children: Vec::new(),
                        props: Props::new(d.tag, d.attrs, d.layout),
                    })
                }
            };
            match parent.and_then(|p| self.nodes.get_mut(p)) {
                Some(p) => p.children.push(id),
                None => roots.push(id),
            }
            index.insert(d.identity, id);
            order.push(id);
        }

        let dropped = self.index.len();
        for (_, id) in self.index.drain() {
            self.nodes.remove(id);
        }
        self.index = index;
        self.roots = roots;
        self.order = order;
        self.generation += 1;
        debug!(
            generation = self.generation,
            nodes = self.nodes.len(),
            created,
            dropped,
            "frame committed"
        );
    }
}
