//! A small terminal form built with glade.

use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use clap::Parser;
use crossterm::{
    cursor, queue,
    style::{Attribute, Print, SetAttribute},
    terminal,
};
use glade::{
    Builder, Glade, Identity, NodeSpec, Options,
    backend::crossterm::{RunloopOptions, runloop_with_options},
    geom::Rect,
    props::{Align, Props},
    widgets::{Button, TextInput, Toggle},
};
use tracing::{Level, info};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Run the glade demo form.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Write logs to this file
    #[clap(short, long)]
    log: Option<PathBuf>,

    /// Log level
    #[clap(long, default_value = "debug")]
    level: Level,

    /// Report left clicks as touches on this surface
    #[clap(short, long)]
    touch: Option<String>,

    /// Engine options as JSON
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Dump the node tree on exit
    #[clap(short, long)]
    dump: bool,
}

/// Host state carried between frames.
#[derive(Debug, Default)]
struct Form {
    /// Greeting shown under the form.
    status: String,
    /// Number of submissions.
    submitted: usize,
}

impl Form {
    /// Declare one frame of the form.
    fn build(&mut self, b: &mut Builder<'_>) -> glade::error::Result<()> {
        let name = Identity::from_keys(["form", "name"]);
        let loud = Identity::from_keys(["form", "loud"]);
        let send = Identity::from_keys(["form", "send"]);

        if b.fired(&send, Button::CLICK) || b.fired(&name, TextInput::SUBMIT) {
            let text = b.props(&name).map(TextInput::text).unwrap_or_default();
            let on = b.props(&loud).is_some_and(Toggle::is_on);
            self.submitted += 1;
            self.status = if on {
                format!("HELLO, {}!", text.to_uppercase())
            } else {
                format!("Hello, {text}.")
            };
            info!(submitted = self.submitted, "form submitted");
        }

        b.nest(NodeSpec::new("container").key("form").padding(1).gap(1), |b| {
            b.add(NodeSpec::new("label").attr("label", "Who are you?"))?;
            b.add(NodeSpec::new("text_input").key("name").size(30, 1))?;
            b.nest(NodeSpec::new("container").row().gap(2), |b| {
                b.add(NodeSpec::new("label").attr("label", "Loud"))?;
                b.add(NodeSpec::new("toggle").key("loud").size(3, 1))?;
                Ok(())
            })?;
            b.add(
                NodeSpec::new("button")
                    .key("send")
                    .size(10, 1)
                    .align(Align::End)
                    .attr("label", "Send"),
            )?;
            b.add(NodeSpec::new("label").key("status").attr("label", self.status.clone()))?;
            Ok(())
        })?;
        Ok(())
    }
}

/// The text a node shows, if any.
fn face(props: &Props) -> Option<String> {
    let label = props.attr("label").and_then(|v| v.as_text()).unwrap_or("");
    match props.tag().as_str() {
        "button" => Some(format!("[{label}]")),
        "toggle" => Some(if Toggle::is_on(props) { "[x]" } else { "[ ]" }.into()),
        "text_input" => Some(TextInput::text(props).to_string()),
        "label" => Some(label.to_string()),
        _ => None,
    }
}

/// Paint every node with a face into its rectangle.
fn draw(glade: &Glade) -> glade::error::Result<()> {
    let mut out = io::stderr();
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    let store = glade.store();
    for id in store.order() {
        let (Some(rect), Ok(props)) = (glade.render().rect(*id), store.props(*id)) else {
            continue;
        };
        let Some(text) = face(props) else {
            continue;
        };
        paint(&mut out, rect, &text, props.focused())?;
    }
    out.flush()?;
    Ok(())
}

/// Write text clipped to the first row of a rect. Focused nodes are shown
/// reversed, padded to the full width.
fn paint(out: &mut impl Write, rect: Rect, text: &str, focused: bool) -> io::Result<()> {
    if rect.is_empty() {
        return Ok(());
    }
    let width = rect.w as usize;
    let mut shown = String::new();
    let mut used = 0;
    for c in text.chars() {
        used += c.width().unwrap_or(0);
        if used > width {
            break;
        }
        shown.push(c);
    }
    // Screen coordinates are 1-based.
    let col = u16::try_from(rect.tl.x.saturating_sub(1)).unwrap_or(u16::MAX);
    let row = u16::try_from(rect.tl.y.saturating_sub(1)).unwrap_or(u16::MAX);
    queue!(out, cursor::MoveTo(col, row))?;
    if focused {
        let pad = width.saturating_sub(shown.width());
        queue!(
            out,
            SetAttribute(Attribute::Reverse),
            Print(format!("{shown}{}", " ".repeat(pad))),
            SetAttribute(Attribute::Reset)
        )?;
    } else {
        queue!(out, Print(shown))?;
    }
    Ok(())
}

/// Route tracing output to a file.
fn init_logging(path: &Path, level: Level) -> anyhow::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_logging(path, args.level)?;
    }
    let options = match &args.config {
        Some(path) => Options::from_path(path)?,
        None => Options::default(),
    };
    let run = RunloopOptions {
        install_panic_hook: true,
        dump_on_exit: args.dump,
        touch_emulation: args.touch.clone(),
    };

    let mut glade = Glade::with_options(options);
    let mut form = Form::default();
    runloop_with_options(&mut glade, &run, |b| form.build(b), draw)?;
    Ok(())
}
