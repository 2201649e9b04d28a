//! Props records: what the host declares about a node each frame, plus the
//! interaction state the engine carries across frames.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{TypeTag, event::mouse::Button, geom::Axis};

/// An attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Text(String),
}

impl Value {
    /// The value as a bool, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a float. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Attribute mapping, ordered by name so dumps and comparisons are stable.
pub type Attrs = BTreeMap<String, Value>;

/// Cross-axis alignment of a node within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Against the start of the cross axis.
    Start,
    /// Centred on the cross axis.
    Center,
    /// Against the end of the cross axis.
    End,
    /// Fill the cross axis unless an explicit size is given.
    #[default]
    Stretch,
}

/// Layout hints declared for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayoutSpec {
    /// Axis along which children flow.
    pub direction: Axis,
    /// Fixed outer width.
    pub width: Option<u32>,
    /// Fixed outer height.
    pub height: Option<u32>,
    /// Claim the remaining space along the parent's axis.
    pub expand: bool,
    /// Cells of padding on every side of the content area.
    pub padding: u32,
    /// Cells between consecutive children.
    pub gap: u32,
    /// Cross-axis alignment within the parent.
    pub align: Align,
}

impl LayoutSpec {
    /// The fixed size along an axis, if any.
    pub fn fixed(&self, axis: Axis) -> Option<u32> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// The persistent record of a node.
///
/// The tag, attributes and layout hints are rewritten by every frame's
/// declaration. Focus, pressed button, widget memory and signals are never
/// touched by the builder; only dispatch and the node's own behavior write
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct Props {
    /// Widget type.
    pub(crate) tag: TypeTag,
    /// Declared attributes.
    pub(crate) attrs: Attrs,
    /// Declared layout hints.
    pub(crate) layout: LayoutSpec,
    /// Whether the node holds focus.
    pub(crate) focused: bool,
    /// The button currently held down on this node.
    pub(crate) pressed: Option<Button>,
    /// State owned by the widget behavior.
    pub(crate) memory: Attrs,
    /// Notifications emitted by the widget behavior since the last frame.
    pub(crate) signals: Vec<String>,
}

impl Props {
    /// A fresh record with initial interaction state.
    pub(crate) fn new(tag: TypeTag, attrs: Attrs, layout: LayoutSpec) -> Self {
        Self {
            tag,
            attrs,
            layout,
            focused: false,
            pressed: None,
            memory: Attrs::new(),
            signals: Vec::new(),
        }
    }

    /// Overwrite the declared fields, leaving interaction state alone.
    /// Signals are consumed by the frame that observed them.
    pub(crate) fn refresh(&mut self, tag: TypeTag, attrs: Attrs, layout: LayoutSpec) {
        self.tag = tag;
        self.attrs = attrs;
        self.layout = layout;
        self.signals.clear();
    }

    /// Widget type tag.
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// All declared attributes.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// A declared attribute.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Declared layout hints.
    pub fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    /// Does this node hold focus?
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// The button held down on this node, if any.
    pub fn pressed(&self) -> Option<Button> {
        self.pressed
    }

    /// All widget memory.
    pub fn memory(&self) -> &Attrs {
        &self.memory
    }

    /// A value from widget memory.
    pub fn memory_value(&self, name: &str) -> Option<&Value> {
        self.memory.get(name)
    }

    /// Signals emitted since the last frame.
    pub fn signals(&self) -> &[String] {
        &self.signals
    }

    /// Was a signal emitted since the last frame?
    pub fn fired(&self, signal: &str) -> bool {
        self.signals.iter().any(|s| s == signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn refresh_keeps_interaction_state() -> Result<()> {
        let mut p = Props::new(TypeTag::new("input")?, Attrs::new(), LayoutSpec::default());
        p.focused = true;
        p.pressed = Some(Button::Left);
        p.memory.insert("text".into(), "abc".into());
        p.signals.push("submit".into());

        let mut attrs = Attrs::new();
        attrs.insert("color".into(), "red".into());
        p.refresh(TypeTag::new("input")?, attrs, LayoutSpec::default());

        assert!(p.focused());
        assert_eq!(p.pressed(), Some(Button::Left));
        assert_eq!(p.memory_value("text"), Some(&Value::from("abc")));
        assert_eq!(p.attr("color"), Some(&Value::from("red")));
        assert!(p.signals().is_empty());
        Ok(())
    }

    #[test]
    fn value_accessors() {
        assert_eq!(Value::from(3).as_float(), Some(3.0));
        assert_eq!(Value::from("x").as_text(), Some("x"));
        assert_eq!(Value::from(true).as_int(), None);
        let v: Value = serde_json::from_str("12").unwrap();
        assert_eq!(v, Value::Int(12));
    }
}
