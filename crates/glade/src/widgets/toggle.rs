use crate::{
    NodeHandle, Widget,
    error::Result,
    event::{
        key::{Key, KeyCode},
        mouse,
    },
    geom::Point,
    props::Props,
};

/// Memory key holding the toggle state.
const ON: &str = "on";
/// Memory key set while the left button is held down on the toggle.
const ARMED: &str = "armed";

/// An on/off switch.
///
/// Flips on a left click pressed and released inside the node, or on space or
/// enter while focused, and emits `toggled`. The initial state comes from the `on`
/// attribute; after the first flip the toggle remembers its own state.
#[derive(Debug, Default, Clone, Copy)]
pub struct Toggle;

impl Toggle {
    /// The signal emitted when the state changes.
    pub const TOGGLED: &'static str = "toggled";

    /// Is the toggle described by this record switched on?
    pub fn is_on(props: &Props) -> bool {
        props
            .memory_value(ON)
            .or_else(|| props.attr(ON))
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Flip the state and emit a signal.
    fn flip(node: &mut NodeHandle<'_>) {
        let on = Self::is_on(node.props());
        node.set_memory(ON, !on);
        node.emit(Self::TOGGLED);
    }
}

impl Widget for Toggle {
    fn handle_click(
        &self,
        node: &mut NodeHandle<'_>,
        _location: Point,
        button: mouse::Button,
    ) -> Result<()> {
        if button == mouse::Button::Left {
            node.set_focused(true);
            node.set_memory(ARMED, true);
        }
        Ok(())
    }

    fn handle_click_up(
        &self,
        node: &mut NodeHandle<'_>,
        location: Point,
        button: mouse::Button,
    ) -> Result<()> {
        if button != mouse::Button::Left {
            return Ok(());
        }
        let armed = node.memory_bool(ARMED);
        node.clear_memory(ARMED);
        if armed && !location.is_zero() {
            Self::flip(node);
        }
        Ok(())
    }

    fn handle_key(&self, node: &mut NodeHandle<'_>, key: Key, held: bool) -> Result<()> {
        if node.focused() && !held && (key == KeyCode::Enter || key == ' ') {
            Self::flip(node);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Identity, NodeSpec, NodeStore};

    #[test]
    fn flips_and_remembers() -> Result<()> {
        let mut store = NodeStore::new();
        store.rebuild(|b| b.add(NodeSpec::new("toggle").key("t").attr("on", true)).map(|_| ()))?;
        let id = store.lookup(&Identity::from_keys(["t"])).expect("declared");
        assert!(Toggle::is_on(store.props(id)?));
        {
            let mut h = store.handle(id)?;
            Toggle.handle_click(&mut h, Point::new(1, 1), mouse::Button::Left)?;
            Toggle.handle_click_up(&mut h, Point::new(1, 1), mouse::Button::Left)?;
        }
        assert!(!Toggle::is_on(store.props(id)?));
        assert!(store.props(id)?.fired(Toggle::TOGGLED));

        // Memory wins over the declared attribute on the next frame.
        store.rebuild(|b| b.add(NodeSpec::new("toggle").key("t").attr("on", true)).map(|_| ()))?;
        assert!(!Toggle::is_on(store.props(id)?));
        assert!(store.props(id)?.focused());

        {
            let mut h = store.handle(id)?;
            Toggle.handle_key(&mut h, ' '.into(), true)?;
            assert!(!Toggle::is_on(h.props()));
            Toggle.handle_key(&mut h, ' '.into(), false)?;
            assert!(Toggle::is_on(h.props()));
        }
        Ok(())
    }

    #[test]
    fn release_without_press_does_not_flip() -> Result<()> {
        let mut store = NodeStore::new();
        store.rebuild(|b| b.add(NodeSpec::new("toggle").key("t")).map(|_| ()))?;
        let id = store.lookup(&Identity::from_keys(["t"])).expect("declared");
        let mut h = store.handle(id)?;
        // A drag that started elsewhere ends here.
        Toggle.handle_click_up(&mut h, Point::new(2, 2), mouse::Button::Left)?;
        assert!(!Toggle::is_on(h.props()));
        assert!(!h.props().fired(Toggle::TOGGLED));

        // Pressed here, released outside.
        Toggle.handle_click(&mut h, Point::new(2, 2), mouse::Button::Left)?;
        Toggle.handle_click_up(&mut h, Point::zero(), mouse::Button::Left)?;
        assert!(!Toggle::is_on(h.props()));
        assert!(!h.memory_bool(ARMED));
        Ok(())
    }
}
