//! Per-frame tree declaration.

use std::collections::HashSet;

use crate::{
    Identity, NodeKey, NodeStore, TypeTag,
    error::{Error, Result},
    geom::Axis,
    props::{Align, Attrs, LayoutSpec, Props, Value},
};

/// A node declaration, built fluently and handed to [`Builder::add`] or
/// [`Builder::nest`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    /// Type tag before normalization.
    tag: String,
    /// Explicit key, if any.
    key: Option<String>,
    /// Declared attributes.
    attrs: Attrs,
    /// Layout hints.
    layout: LayoutSpec,
}

impl NodeSpec {
    /// Declare a node of the given type.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            key: None,
            attrs: Attrs::new(),
            layout: LayoutSpec::default(),
        }
    }

    /// Give the node a stable key among its siblings.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Fixed outer width.
    pub fn width(mut self, w: u32) -> Self {
        self.layout.width = Some(w);
        self
    }

    /// Fixed outer height.
    pub fn height(mut self, h: u32) -> Self {
        self.layout.height = Some(h);
        self
    }

    /// Fixed outer width and height.
    pub fn size(self, w: u32, h: u32) -> Self {
        self.width(w).height(h)
    }

    /// Claim a share of the parent's remaining space.
    pub fn expand(mut self) -> Self {
        self.layout.expand = true;
        self
    }

    /// Lay children out left to right.
    pub fn row(mut self) -> Self {
        self.layout.direction = Axis::Horizontal;
        self
    }

    /// Lay children out top to bottom. This is the default.
    pub fn column(mut self) -> Self {
        self.layout.direction = Axis::Vertical;
        self
    }

    /// Padding on every side of the content area.
    pub fn padding(mut self, cells: u32) -> Self {
        self.layout.padding = cells;
        self
    }

    /// Space between consecutive children.
    pub fn gap(mut self, cells: u32) -> Self {
        self.layout.gap = cells;
        self
    }

    /// Cross-axis alignment within the parent.
    pub fn align(mut self, align: Align) -> Self {
        self.layout.align = align;
        self
    }
}

/// A validated declaration waiting for commit.
#[derive(Debug, Clone)]
pub(crate) struct Declared {
    /// Full identity path.
    pub(crate) identity: Identity,
    /// Position of the parent declaration in the frame's list.
    pub(crate) parent: Option<usize>,
    /// Normalized tag.
    pub(crate) tag: TypeTag,
    /// Declared attributes.
    pub(crate) attrs: Attrs,
    /// Layout hints.
    pub(crate) layout: LayoutSpec,
}

/// Sibling bookkeeping for the container currently being populated.
#[derive(Debug)]
struct Scope {
    /// Position of the container's declaration, `None` at the top level.
    parent: Option<usize>,
    /// The container's identity.
    identity: Identity,
    /// Children declared so far.
    count: usize,
    /// Keys claimed so far.
    keys: HashSet<NodeKey>,
}

impl Scope {
    /// Bookkeeping for a new container.
    fn new(parent: Option<usize>, identity: Identity) -> Self {
        Self {
            parent,
            identity,
            count: 0,
            keys: HashSet::new(),
        }
    }
}

/// The per-frame declaration API.
///
/// Nothing declared through a builder touches the store until the whole frame
/// has been built successfully. The first error aborts the frame: every later
/// call fails with the same error, so the frame fails even when the host
/// ignores a result.
#[derive(Debug)]
pub struct Builder<'a> {
    /// The store as of the previous frame.
    previous: &'a NodeStore,
    /// Declarations in pre-order.
    declared: Vec<Declared>,
    /// Open containers, outermost first.
    scopes: Vec<Scope>,
    /// First error raised in this frame.
    fault: Option<Error>,
}

impl<'a> Builder<'a> {
    /// A builder for a frame following `previous`.
    pub(crate) fn new(previous: &'a NodeStore) -> Self {
        Self {
            previous,
            declared: Vec::new(),
            scopes: vec![Scope::new(None, Identity::root())],
            fault: None,
        }
    }

    /// The store as it was after the previous frame, including the state
    /// dispatch has written since.
    pub fn previous(&self) -> &NodeStore {
        self.previous
    }

    /// The previous frame's record for an identity.
    pub fn props(&self, identity: &Identity) -> Option<&Props> {
        self.previous.find(identity)
    }

    /// Did the node with this identity emit a signal since the last frame?
    pub fn fired(&self, identity: &Identity, signal: &str) -> bool {
        self.props(identity).is_some_and(|p| p.fired(signal))
    }

    /// The identity of the container currently being populated.
    pub fn current(&self) -> Identity {
        self.scopes
            .last()
            .map(|s| s.identity.clone())
            .unwrap_or_default()
    }

    /// Declare a leaf node, returning its identity.
    pub fn add(&mut self, spec: NodeSpec) -> Result<Identity> {
        self.declare(spec).map(|(identity, _)| identity)
    }

    /// Declare a container node and its children.
    pub fn nest<F>(&mut self, spec: NodeSpec, children: F) -> Result<Identity>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let (identity, pos) = self.declare(spec)?;
        self.scopes.push(Scope::new(Some(pos), identity.clone()));
        let ret = children(self);
        self.scopes.pop();
        if let Err(e) = ret {
            return Err(self.fail(e));
        }
        self.check()?;
        Ok(identity)
    }

    /// Validate a declaration and record it.
    fn declare(&mut self, spec: NodeSpec) -> Result<(Identity, usize)> {
        self.check()?;
        if spec.key.as_deref() == Some("") {
            let under = self.current();
            return Err(self.fail(Error::Invalid(format!("empty key under {under}"))));
        }
        let (identity, parent, fresh) = {
            let scope = self
                .scopes
                .last_mut()
                .ok_or_else(|| Error::Internal("builder scope stack is empty".into()))?;
            let ordinal = scope.count;
            scope.count += 1;
            let key = spec.key.map_or(NodeKey::Ordinal(ordinal), NodeKey::Explicit);
            (
                scope.identity.child(key.clone()),
                scope.parent,
                scope.keys.insert(key),
            )
        };
        if !fresh {
            return Err(self.fail(Error::DuplicateIdentity {
                identity: identity.to_string(),
            }));
        }
        let tag = match TypeTag::new(&spec.tag) {
            Ok(t) => t,
            Err(e) => return Err(self.fail(e)),
        };
        self.declared.push(Declared {
            identity: identity.clone(),
            parent,
            tag,
            attrs: spec.attrs,
            layout: spec.layout,
        });
        Ok((identity, self.declared.len() - 1))
    }

    /// Fail if the frame has already been aborted.
    fn check(&self) -> Result<()> {
        match &self.fault {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    /// Record the first error of the frame and return it.
    fn fail(&mut self, e: Error) -> Error {
        self.fault.get_or_insert(e).clone()
    }

    /// Close the frame. The frame is rejected if the build closure failed or
    /// any builder call failed along the way.
    pub(crate) fn finish(self, ret: Result<()>) -> Result<Vec<Declared>> {
        if let Some(e) = self.fault {
            return Err(e);
        }
        ret?;
        Ok(self.declared)
    }
}
