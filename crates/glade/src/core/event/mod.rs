/// Keyboard input.
pub mod key;
/// Pointer buttons.
pub mod mouse;

use std::time::Duration;

use crate::{
    TimerId,
    error::Result,
    geom::{Expanse, Point},
};

/// Raw input, as delivered by the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// Stop the run loop.
    Terminate,
    /// A timer scheduled with [`EventSource::start_timer`] fired.
    Timer(TimerId),
    /// A touch on a named surface. Touch hardware reports presses only.
    Touch {
        /// Surface the touch originated from.
        surface: String,
        /// Touch location.
        location: Point,
    },
    /// A pointer button was pressed.
    MouseDown {
        /// Pressed button.
        button: mouse::Button,
        /// Pointer location.
        location: Point,
    },
    /// A pointer button was released.
    MouseUp {
        /// Released button.
        button: mouse::Button,
        /// Pointer location.
        location: Point,
    },
    /// A key was pressed, or is auto-repeating.
    KeyDown {
        /// The key.
        key: key::Key,
        /// True for auto-repeat while the key is held.
        held: bool,
    },
    /// A key was released.
    KeyUp {
        /// The key.
        key: key::Key,
    },
    /// The root surface changed size.
    Resize(Expanse),
    /// Anything else. Ignored by the dispatcher.
    Other(String),
}

/// The host environment's input queue.
pub trait EventSource {
    /// Block until the next raw event arrives.
    fn next(&mut self) -> Result<RawEvent>;

    /// Schedule a timer. The source must later deliver
    /// [`RawEvent::Timer`] with the returned id once `delay` has passed.
    fn start_timer(&mut self, delay: Duration) -> Result<TimerId>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next(&mut self) -> Result<RawEvent> {
        (**self).next()
    }

    fn start_timer(&mut self, delay: Duration) -> Result<TimerId> {
        (**self).start_timer(delay)
    }
}
