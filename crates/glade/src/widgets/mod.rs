//! Reference widget behaviors.
//!
//! Each behavior keeps its state in the node's widget memory and reports
//! interactions as signals, which the host reads while building the next
//! frame with [`Builder::fired`](crate::Builder::fired).

/// Push button.
pub mod button;
/// Passive widgets.
pub mod passive;
/// Single-line text input.
pub mod text_input;
/// On/off toggle.
pub mod toggle;

pub use button::Button;
pub use passive::{Container, Label};
pub use text_input::TextInput;
pub use toggle::Toggle;

use crate::{Registry, TypeTag};

/// Register every reference widget under its conventional tag.
pub(crate) fn register_defaults(r: &mut Registry) {
    r.insert(TypeTag::known("button"), Box::new(Button));
    r.insert(TypeTag::known("toggle"), Box::new(Toggle));
    r.insert(TypeTag::known("text_input"), Box::new(TextInput));
    r.insert(TypeTag::known("label"), Box::new(Label));
    r.insert(TypeTag::known("container"), Box::new(Container));
}
