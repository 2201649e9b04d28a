use std::io::Write;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use crate::{
    NodeStore, RenderTree,
    error::{Error, Result},
};

/// Render the node tree as a table of identity, tag, rectangle and
/// interaction state, one row per node in pre-order. This is a debug
/// function.
pub fn dump(store: &NodeStore, render: &RenderTree) -> Result<String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["identity", "tag", "rect", "focused", "pressed"]);
    for id in store.order() {
        let node = store.node(*id)?;
        let props = node.props();
        let indent = "  ".repeat(node.identity().depth().saturating_sub(1));
        let rect = render
            .rect(*id)
            .map_or_else(|| "-".to_string(), |r| r.to_string());
        let focused = if props.focused() {
            Cell::new("yes").fg(Color::Magenta)
        } else {
            Cell::new("")
        };
        let pressed = props
            .pressed()
            .map_or_else(String::new, |b| format!("button {b}"));
        table.add_row(vec![
            Cell::new(format!("{indent}{}", node.identity())).fg(Color::Green),
            Cell::new(props.tag()),
            Cell::new(rect),
            focused,
            Cell::new(pressed),
        ]);
    }
    Ok(table.to_string())
}

/// Write the node table to a writer.
pub fn dump_to(w: &mut dyn Write, store: &NodeStore, render: &RenderTree) -> Result<()> {
    let table = dump(store, render)?;
    writeln!(w, "{table}").map_err(|x| Error::Internal(x.to_string()))
}
