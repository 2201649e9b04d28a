//! The widget behavior contract.

use std::any::{Any, type_name};

use crate::{
    NodeHandle,
    error::Result,
    event::{key::Key, mouse::Button},
    geom::Point,
};

/// Widgets are the behaviors selected by a node's type tag.
///
/// A behavior is shared by every node carrying its tag and holds no state of
/// its own with respect to the engine: everything it needs to remember lives
/// in the node's record, reached through the handle each call receives. Every
/// handler defaults to a no-op, so a behavior implements only what it reacts
/// to.
pub trait Widget: Any + Send {
    /// A pointer button went down inside the node. `location` is relative to
    /// the node, whose top-left cell is (1, 1).
    fn handle_click(
        &self,
        _node: &mut NodeHandle<'_>,
        _location: Point,
        _button: Button,
    ) -> Result<()> {
        Ok(())
    }

    /// A pointer button was released. `location` is relative to the node,
    /// or (0, 0) if the release happened outside a node that was pressed.
    fn handle_click_up(
        &self,
        _node: &mut NodeHandle<'_>,
        _location: Point,
        _button: Button,
    ) -> Result<()> {
        Ok(())
    }

    /// A key went down. `held` is true for auto-repeat.
    fn handle_key(&self, _node: &mut NodeHandle<'_>, _key: Key, _held: bool) -> Result<()> {
        Ok(())
    }

    /// A key was released.
    fn handle_key_up(&self, _node: &mut NodeHandle<'_>, _key: Key) -> Result<()> {
        Ok(())
    }

    /// The node lost focus because a pointer went down elsewhere.
    fn handle_lost_focus(&self, _node: &mut NodeHandle<'_>) -> Result<()> {
        Ok(())
    }

    /// Name used as the default type tag when registering.
    fn name(&self) -> String {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name).to_string()
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A behavior that reacts to nothing.
    struct Inert;

    impl Widget for Inert {}

    #[test]
    fn default_name() {
        assert_eq!(Inert.name(), "Inert");
        let b: Box<dyn Widget> = Inert.into();
        assert_eq!(b.name(), "Inert");
    }
}
