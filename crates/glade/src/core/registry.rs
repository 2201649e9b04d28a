use std::{collections::HashMap, fmt};

use tracing::debug;

use crate::{
    TypeTag, Widget,
    error::{Error, Result},
    widgets,
};

/// Maps type tags to widget behaviors.
///
/// Registration is explicit. Tags are only resolved when events are
/// dispatched, so a tree may declare tags that are registered later.
#[derive(Default)]
pub struct Registry {
    /// Registered behaviors.
    widgets: HashMap<TypeTag, Box<dyn Widget>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the reference widgets: `button`, `toggle`,
    /// `text_input`, `label` and `container`.
    pub fn with_defaults() -> Self {
        let mut r = Self::new();
        widgets::register_defaults(&mut r);
        r
    }

    /// Register a behavior under a tag. A previous behavior for the same tag
    /// is replaced.
    pub fn register(&mut self, tag: &str, widget: impl Into<Box<dyn Widget>>) -> Result<()> {
        let tag = TypeTag::new(tag)?;
        self.insert(tag, widget.into());
        Ok(())
    }

    /// Register a behavior under the tag derived from its name.
    pub fn add<W: Widget + 'static>(&mut self, widget: W) -> Result<()> {
        let tag = TypeTag::new(&widget.name())?;
        self.insert(tag, Box::new(widget));
        Ok(())
    }

    /// Store a behavior, replacing any previous one.
    pub(crate) fn insert(&mut self, tag: TypeTag, widget: Box<dyn Widget>) {
        if self.widgets.insert(tag.clone(), widget).is_some() {
            debug!(%tag, "widget behavior replaced");
        }
    }

    /// Resolve a tag.
    pub fn get(&self, tag: &TypeTag) -> Result<&dyn Widget> {
        self.widgets
            .get(tag)
            .map(|w| w.as_ref())
            .ok_or_else(|| Error::UnknownWidgetType(tag.to_string()))
    }

    /// Is a behavior registered for the tag?
    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.widgets.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&TypeTag> {
        let mut tags: Vec<_> = self.widgets.keys().collect();
        tags.sort();
        tags
    }

    /// Number of registered behaviors.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("tags", &self.tags())
            .finish()
    }
}
