use std::{
    collections::VecDeque,
    io::{self, Stderr},
    panic,
    time::Duration,
};

use color_backtrace::{BacktracePrinter, default_output_stream};
use scopeguard::guard;
use tracing::{debug, trace};

use crate::{
    Builder, Glade, TimerId,
    backend::{BackendControl, TerminalSession, timers::TimerHeap},
    dump,
    error::Result,
    event::{EventSource, RawEvent, key, mouse},
    geom::{Expanse, Point},
};

use crossterm::{self, ExecutableCommand, cursor as ccursor, event as cevent, terminal};

/// Crossterm-backed implementation of `BackendControl`.
#[derive(Debug)]
pub struct CrosstermControl {
    /// Stderr handle used for control output.
    fp: Stderr,
    /// Keyboard enhancement flags were pushed and must be popped on exit.
    enhanced: bool,
}

impl CrosstermControl {
    /// Enter alternate screen and raw mode.
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        // Key release and repeat events are only reported with the kitty
        // keyboard protocol.
        if terminal::supports_keyboard_enhancement()? {
            self.fp.execute(cevent::PushKeyboardEnhancementFlags(
                cevent::KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            self.enhanced = true;
            debug!("keyboard enhancement enabled");
        }
        self.fp.execute(terminal::EnterAlternateScreen)?;
        self.fp.execute(cevent::EnableMouseCapture)?;
        self.fp.execute(ccursor::Hide)?;
        Ok(())
    }

    /// Leave alternate screen and restore terminal state.
    fn exit(&mut self) -> io::Result<()> {
        if self.enhanced {
            self.fp.execute(cevent::PopKeyboardEnhancementFlags)?;
            self.enhanced = false;
        }
        self.fp.execute(terminal::LeaveAlternateScreen)?;
        self.fp.execute(cevent::DisableMouseCapture)?;
        self.fp.execute(ccursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Default for CrosstermControl {
    fn default() -> Self {
        Self {
            fp: io::stderr(),
            enhanced: false,
        }
    }
}

impl BackendControl for CrosstermControl {
    fn start(&mut self) -> Result<()> {
        Ok(self.enter()?)
    }

    fn stop(&mut self) -> Result<()> {
        Ok(self.exit()?)
    }
}

/// Translate crossterm key modifiers into glade modifiers.
fn translate_key_modifiers(mods: cevent::KeyModifiers) -> key::Mods {
    key::Mods {
        shift: mods.contains(cevent::KeyModifiers::SHIFT),
        ctrl: mods.contains(cevent::KeyModifiers::CONTROL),
        alt: mods.contains(cevent::KeyModifiers::ALT),
    }
}

/// Translate a crossterm mouse button into a glade button.
fn translate_button(b: cevent::MouseButton) -> mouse::Button {
    match b {
        cevent::MouseButton::Left => mouse::Button::Left,
        cevent::MouseButton::Right => mouse::Button::Right,
        cevent::MouseButton::Middle => mouse::Button::Middle,
    }
}

/// Translate a crossterm key code. Keys glade has no code for map to `Null`.
fn translate_key_code(code: cevent::KeyCode) -> key::KeyCode {
    match code {
        cevent::KeyCode::Backspace => key::KeyCode::Backspace,
        cevent::KeyCode::Enter => key::KeyCode::Enter,
        cevent::KeyCode::Left => key::KeyCode::Left,
        cevent::KeyCode::Right => key::KeyCode::Right,
        cevent::KeyCode::Up => key::KeyCode::Up,
        cevent::KeyCode::Down => key::KeyCode::Down,
        cevent::KeyCode::Home => key::KeyCode::Home,
        cevent::KeyCode::End => key::KeyCode::End,
        cevent::KeyCode::PageUp => key::KeyCode::PageUp,
        cevent::KeyCode::PageDown => key::KeyCode::PageDown,
        cevent::KeyCode::Tab => key::KeyCode::Tab,
        cevent::KeyCode::BackTab => key::KeyCode::BackTab,
        cevent::KeyCode::Delete => key::KeyCode::Delete,
        cevent::KeyCode::Insert => key::KeyCode::Insert,
        cevent::KeyCode::F(x) => key::KeyCode::F(x),
        cevent::KeyCode::Char(c) => key::KeyCode::Char(c),
        cevent::KeyCode::Esc => key::KeyCode::Esc,
        _ => key::KeyCode::Null,
    }
}

/// Crossterm reports 0-based cells, glade is 1-based.
fn translate_location(column: u16, row: u16) -> Point {
    Point::new(u32::from(column) + 1, u32::from(row) + 1)
}

/// Translate a crossterm event into a raw glade event.
fn translate_event(e: cevent::Event) -> RawEvent {
    match e {
        cevent::Event::Key(k) => {
            let key = key::Key {
                mods: translate_key_modifiers(k.modifiers),
                key: translate_key_code(k.code),
            };
            match k.kind {
                cevent::KeyEventKind::Press => RawEvent::KeyDown { key, held: false },
                cevent::KeyEventKind::Repeat => RawEvent::KeyDown { key, held: true },
                cevent::KeyEventKind::Release => RawEvent::KeyUp { key },
            }
        }
        cevent::Event::Mouse(m) => {
            let location = translate_location(m.column, m.row);
            match m.kind {
                cevent::MouseEventKind::Down(b) => RawEvent::MouseDown {
                    button: translate_button(b),
                    location,
                },
                cevent::MouseEventKind::Up(b) => RawEvent::MouseUp {
                    button: translate_button(b),
                    location,
                },
                other => RawEvent::Other(format!("mouse {other:?} at {location}")),
            }
        }
        cevent::Event::Resize(x, y) => RawEvent::Resize(Expanse::new(x.into(), y.into())),
        cevent::Event::FocusGained => RawEvent::Other("focus gained".into()),
        cevent::Event::FocusLost => RawEvent::Other("focus lost".into()),
        cevent::Event::Paste(_) => RawEvent::Other("paste".into()),
    }
}

/// An event source reading the terminal through crossterm.
///
/// Timers are kept on a deadline heap; while any are pending the source
/// polls the terminal with the time left to the nearest deadline and reports
/// [`RawEvent::Timer`] once it passes. Ctrl+C reports
/// [`RawEvent::Terminate`].
///
/// With touch emulation enabled, left button presses are reported as touches
/// on the named surface and left button releases are dropped, which exercises
/// the press-only touch path from an ordinary terminal.
#[derive(Debug, Default)]
pub struct CrosstermSource {
    /// Pending timer deadlines.
    timers: TimerHeap,
    /// Due timers not yet reported.
    due: VecDeque<TimerId>,
    /// Surface name for touch emulation.
    touch: Option<String>,
}

impl CrosstermSource {
    /// A source reading the terminal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report left button presses as touches on `surface`.
    pub fn with_touch_emulation(mut self, surface: impl Into<String>) -> Self {
        self.touch = Some(surface.into());
        self
    }

    /// Apply source policy to a translated event. Returns `None` for events
    /// that are swallowed.
    fn filter(&self, event: RawEvent) -> Option<RawEvent> {
        match event {
            RawEvent::KeyDown {
                key:
                    key::Key {
                        key: key::KeyCode::Char('c'),
                        mods: key::Mods { ctrl: true, .. },
                    },
                ..
            } => Some(RawEvent::Terminate),
            RawEvent::MouseDown {
                button: mouse::Button::Left,
                location,
            } if self.touch.is_some() => Some(RawEvent::Touch {
                surface: self.touch.clone().unwrap_or_default(),
                location,
            }),
            RawEvent::MouseUp {
                button: mouse::Button::Left,
                ..
            } if self.touch.is_some() => None,
            e => Some(e),
        }
    }
}

impl EventSource for CrosstermSource {
    fn next(&mut self) -> Result<RawEvent> {
        loop {
            if let Some(id) = self.due.pop_front() {
                return Ok(RawEvent::Timer(id));
            }
            let due = self.timers.collect();
            if !due.is_empty() {
                self.due.extend(due);
                continue;
            }
            if let Some(wait) = self.timers.current_wait()
                && !cevent::poll(wait)?
            {
                continue;
            }
            let event = translate_event(cevent::read()?);
            match self.filter(event) {
                Some(e) => return Ok(e),
                None => trace!("swallowed emulated touch release"),
            }
        }
    }

    fn start_timer(&mut self, delay: Duration) -> Result<TimerId> {
        Ok(self.timers.schedule(delay))
    }
}

/// Options for configuring the crossterm runloop behavior.
#[derive(Debug, Clone, Default)]
pub struct RunloopOptions {
    /// Install a panic hook that restores the terminal before printing a backtrace.
    pub install_panic_hook: bool,
    /// Dump the node tree to stderr after the loop ends.
    pub dump_on_exit: bool,
    /// Report left button presses as touches on this surface.
    pub touch_emulation: Option<String>,
}

impl RunloopOptions {
    /// Construct options that dump the node tree on exit.
    pub fn dump() -> Self {
        Self {
            dump_on_exit: true,
            ..Self::default()
        }
    }
}

/// Run the host loop on the terminal.
pub fn runloop<F, D>(glade: &mut Glade, build: F, draw: D) -> Result<()>
where
    F: FnMut(&mut Builder<'_>) -> Result<()>,
    D: FnMut(&Glade) -> Result<()>,
{
    runloop_with_options(glade, &RunloopOptions::default(), build, draw)
}

/// Run the host loop on the terminal with custom options. `draw` is called
/// after every frame has been laid out.
pub fn runloop_with_options<F, D>(
    glade: &mut Glade,
    options: &RunloopOptions,
    build: F,
    draw: D,
) -> Result<()>
where
    F: FnMut(&mut Builder<'_>) -> Result<()>,
    D: FnMut(&Glade) -> Result<()>,
{
    let mut session = TerminalSession::new(Box::new(CrosstermControl::default()))?;

    let _panic_hook = if options.install_panic_hook {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|pi| {
            let mut stderr = io::stderr();
            #[allow(unused_must_use)]
            {
                crossterm::execute!(
                    stderr,
                    cevent::PopKeyboardEnhancementFlags,
                    terminal::LeaveAlternateScreen,
                    cevent::DisableMouseCapture,
                    ccursor::Show
                );
                terminal::disable_raw_mode();
                BacktracePrinter::new().print_panic_info(pi, &mut default_output_stream());
            }
        }));
        Some(guard(previous, |hook| {
            panic::set_hook(hook);
        }))
    } else {
        None
    };

    let (w, h) = terminal::size()?;
    glade.set_screen(Expanse::new(w.into(), h.into()));
    let mut source = CrosstermSource::new();
    if let Some(surface) = &options.touch_emulation {
        source = source.with_touch_emulation(surface.clone());
    }

    let ret = glade.run_with(&mut source, build, draw);
    drop(session.stop());
    if ret.is_err() || options.dump_on_exit {
        if let Err(dump_err) = dump::dump_to(&mut io::stderr(), glade.store(), glade.render()) {
            eprintln!("Failed to dump node tree: {dump_err}");
        }
    }
    ret
}
