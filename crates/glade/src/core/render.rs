use std::collections::HashMap;

use crate::{NodeId, geom::Rect};

/// Geometry for one generation of the node store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderTree {
    /// Store generation this tree was computed from.
    generation: u64,
    /// Rectangle of each node in screen coordinates.
    rects: HashMap<NodeId, Rect>,
}

impl RenderTree {
    /// An empty render tree for a store generation.
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            rects: HashMap::new(),
        }
    }

    /// The store generation this tree belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record a node's rectangle.
    pub fn insert(&mut self, id: NodeId, rect: Rect) {
        self.rects.insert(id, rect);
    }

    /// A node's rectangle.
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    /// Number of nodes with geometry.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// True if no node has geometry.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Iterate over all node rectangles, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        self.rects.iter().map(|(id, r)| (*id, *r))
    }
}
