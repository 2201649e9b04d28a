use crate::{
    NodeHandle, Widget,
    error::Result,
    event::mouse,
    geom::Point,
};

/// Memory key set while the left button is held down on the button.
const ARMED: &str = "armed";

/// A push button.
///
/// Emits `click` when the left button is pressed and released inside the
/// node. Releasing outside disarms the button without a signal. A button
/// declared with the `disabled` attribute ignores input.
#[derive(Debug, Default, Clone, Copy)]
pub struct Button;

impl Button {
    /// The signal emitted on a click.
    pub const CLICK: &'static str = "click";
}

impl Widget for Button {
    fn handle_click(
        &self,
        node: &mut NodeHandle<'_>,
        _location: Point,
        button: mouse::Button,
    ) -> Result<()> {
        if button == mouse::Button::Left && !node.attr_bool("disabled") {
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
            node.emit(Self::CLICK);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Identity, NodeSpec, NodeStore,
        error::Result,
    };

    /// A store holding one button, and its id.
    fn one(spec: NodeSpec) -> Result<(NodeStore, crate::NodeId)> {
        let mut store = NodeStore::new();
        store.rebuild(|b| b.add(spec).map(|_| ()))?;
        let id = store.lookup(&Identity::from_keys(["b"])).expect("declared");
        Ok((store, id))
    }

    #[test]
    fn click_inside() -> Result<()> {
        let (mut store, id) = one(NodeSpec::new("button").key("b"))?;
        let mut h = store.handle(id)?;
        Button.handle_click(&mut h, Point::new(1, 1), mouse::Button::Left)?;
        assert!(h.memory_bool(ARMED));
        Button.handle_click_up(&mut h, Point::new(2, 1), mouse::Button::Left)?;
        assert!(!h.memory_bool(ARMED));
        assert!(h.props().fired(Button::CLICK));
        Ok(())
    }

    #[test]
    fn release_outside_disarms() -> Result<()> {
        let (mut store, id) = one(NodeSpec::new("button").key("b"))?;
        let mut h = store.handle(id)?;
        Button.handle_click(&mut h, Point::new(1, 1), mouse::Button::Left)?;
        Button.handle_click_up(&mut h, Point::zero(), mouse::Button::Left)?;
        assert!(!h.memory_bool(ARMED));
        assert!(h.props().signals().is_empty());
        Ok(())
    }

    #[test]
    fn disabled_and_other_buttons() -> Result<()> {
        let (mut store, id) = one(NodeSpec::new("button").key("b").attr("disabled", true))?;
        let mut h = store.handle(id)?;
        Button.handle_click(&mut h, Point::new(1, 1), mouse::Button::Left)?;
        Button.handle_click_up(&mut h, Point::new(1, 1), mouse::Button::Left)?;
        assert!(h.props().signals().is_empty());

        let (mut store, id) = one(NodeSpec::new("button").key("b"))?;
        let mut h = store.handle(id)?;
        Button.handle_click(&mut h, Point::new(1, 1), mouse::Button::Right)?;
        Button.handle_click_up(&mut h, Point::new(1, 1), mouse::Button::Right)?;
        assert!(h.props().signals().is_empty());
        Ok(())
    }
}
