use unicode_segmentation::UnicodeSegmentation;

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

/// Memory key holding the current text.
const TEXT: &str = "text";
/// Memory key holding the cursor position, in graphemes.
const CURSOR: &str = "cursor";

/// A single-line text input.
///
/// A click focuses the input. While focused, printable keys are inserted at
/// the cursor, backspace and delete remove a grapheme, the arrow keys plus
/// home and end move the cursor, enter emits `submit` and escape gives up
/// focus. Losing focus emits `blur`. The initial text comes from the `value`
/// attribute.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextInput;

impl TextInput {
    /// Signal emitted on enter.
    pub const SUBMIT: &'static str = "submit";
    /// Signal emitted when focus is lost.
    pub const BLUR: &'static str = "blur";
    /// Signal emitted when the text changes.
    pub const CHANGED: &'static str = "changed";

    /// The current text of the input described by this record.
    pub fn text(props: &Props) -> &str {
        props
            .memory_value(TEXT)
            .or_else(|| props.attr("value"))
            .and_then(|v| v.as_text())
            .unwrap_or("")
    }

    /// The cursor position, in graphemes.
    pub fn cursor(props: &Props) -> usize {
        let len = Self::text(props).graphemes(true).count();
        props
            .memory_value(CURSOR)
            .and_then(|v| v.as_int())
            .map_or(len, |c| usize::try_from(c).unwrap_or(0).min(len))
    }

    /// Apply a key to a text and cursor. Returns true if the key was
    /// consumed.
    fn edit(text: &mut Vec<&str>, cursor: &mut usize, buf: &mut String, key: Key) -> bool {
        if let Some(c) = key.printable() {
            buf.push(c);
            return true;
        }
        match key.key {
            KeyCode::Backspace if *cursor > 0 => {
                *cursor -= 1;
                text.remove(*cursor);
            }
            KeyCode::Delete if *cursor < text.len() => {
                text.remove(*cursor);
            }
            KeyCode::Left => *cursor = cursor.saturating_sub(1),
            KeyCode::Right => *cursor = (*cursor + 1).min(text.len()),
            KeyCode::Home => *cursor = 0,
            KeyCode::End => *cursor = text.len(),
            KeyCode::Backspace | KeyCode::Delete => {}
            _ => return false,
        }
        true
    }
}

impl Widget for TextInput {
    fn handle_click(
        &self,
        node: &mut NodeHandle<'_>,
        _location: Point,
        _button: mouse::Button,
    ) -> Result<()> {
        node.set_focused(true);
        Ok(())
    }

    fn handle_key(&self, node: &mut NodeHandle<'_>, key: Key, _held: bool) -> Result<()> {
        if !node.focused() {
            return Ok(());
        }
        match key.key {
            KeyCode::Enter => {
                node.emit(Self::SUBMIT);
                return Ok(());
            }
            KeyCode::Esc => {
                node.set_focused(false);
                node.emit(Self::BLUR);
                return Ok(());
            }
            _ => {}
        }
        let before = Self::text(node.props()).to_string();
        let mut cursor = Self::cursor(node.props());
        let mut graphemes: Vec<&str> = before.graphemes(true).collect();
        let mut typed = String::new();
        if !Self::edit(&mut graphemes, &mut cursor, &mut typed, key) {
            return Ok(());
        }
        let mut after: String = graphemes[..cursor].concat();
        after.push_str(&typed);
        after.push_str(&graphemes[cursor..].concat());
        cursor += typed.graphemes(true).count();
        node.set_memory(CURSOR, cursor as i64);
        if after != before {
            node.set_memory(TEXT, after);
            node.emit(Self::CHANGED);
        }
        Ok(())
    }

    fn handle_lost_focus(&self, node: &mut NodeHandle<'_>) -> Result<()> {
        node.emit(Self::BLUR);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Identity, NodeId, NodeSpec, NodeStore};

    /// A store holding one input with an initial value.
    fn input(value: &str) -> Result<(NodeStore, NodeId)> {
        let mut store = NodeStore::new();
        store.rebuild(|b| {
            b.add(NodeSpec::new("text_input").key("i").attr("value", value))
                .map(|_| ())
        })?;
        let id = store.lookup(&Identity::from_keys(["i"])).expect("declared");
        Ok((store, id))
    }

    /// Send a run of keys to a node.
    fn keys(h: &mut NodeHandle<'_>, keys: &[Key]) -> Result<()> {
        for k in keys {
            TextInput.handle_key(h, *k, false)?;
        }
        Ok(())
    }

    #[test]
    fn ignores_keys_until_focused() -> Result<()> {
        let (mut store, id) = input("ab")?;
        let mut h = store.handle(id)?;
        keys(&mut h, &['x'.into()])?;
        assert_eq!(TextInput::text(h.props()), "ab");
        TextInput.handle_click(&mut h, Point::new(1, 1), mouse::Button::Left)?;
        assert!(h.focused());
        keys(&mut h, &['c'.into()])?;
        assert_eq!(TextInput::text(h.props()), "abc");
        assert!(h.props().fired(TextInput::CHANGED));
        Ok(())
    }

    #[test]
    fn editing() -> Result<()> {
        let (mut store, id) = input("héllo")?;
        let mut h = store.handle(id)?;
        h.set_focused(true);
        keys(
            &mut h,
            &[
                KeyCode::Home.into(),
                KeyCode::Right.into(),
                KeyCode::Delete.into(),
                'e'.into(),
                KeyCode::End.into(),
                KeyCode::Backspace.into(),
                Key::ctrl('x'),
            ],
        )?;
        assert_eq!(TextInput::text(h.props()), "hell");
        assert_eq!(TextInput::cursor(h.props()), 4);
        keys(&mut h, &[KeyCode::Left.into(), '!'.into()])?;
        assert_eq!(TextInput::text(h.props()), "hel!l");
        assert_eq!(TextInput::cursor(h.props()), 4);
        Ok(())
    }

    #[test]
    fn submit_escape_and_blur() -> Result<()> {
        let (mut store, id) = input("")?;
        let mut h = store.handle(id)?;
        h.set_focused(true);
        keys(&mut h, &[KeyCode::Enter.into()])?;
        assert!(h.props().fired(TextInput::SUBMIT));
        keys(&mut h, &[KeyCode::Esc.into()])?;
        assert!(!h.focused());
        assert!(h.props().fired(TextInput::BLUR));
        TextInput.handle_lost_focus(&mut h)?;
        assert_eq!(
            h.props().signals().iter().filter(|s| *s == TextInput::BLUR).count(),
            2
        );
        Ok(())
    }
}
