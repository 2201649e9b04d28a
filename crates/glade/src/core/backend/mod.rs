/// Crossterm event source and run loop.
pub mod crossterm;
/// Deadline heap for event source timers.
pub mod timers;

use std::{fmt::Debug, process};

use crate::error::Result;

pub use crate::event::EventSource;

/// A handle for taking over and releasing the terminal.
pub trait BackendControl: Debug {
    /// Take over the terminal.
    fn start(&mut self) -> Result<()>;

    /// Release the terminal.
    fn stop(&mut self) -> Result<()>;

    /// Release the terminal and exit the process.
    fn exit(&mut self, code: i32) -> ! {
        let _ = self.stop().ok();
        process::exit(code)
    }
}

/// Guard that ensures backend start/stop are paired for a terminal session.
#[derive(Debug)]
pub struct TerminalSession {
    /// Backend controller.
    backend: Box<dyn BackendControl>,
    /// Whether the session has an active backend start.
    active: bool,
}

impl TerminalSession {
    /// Start the backend and create a new session guard.
    pub fn new(mut backend: Box<dyn BackendControl>) -> Result<Self> {
        backend.start()?;
        Ok(Self {
            backend,
            active: true,
        })
    }

    /// Is the backend still started?
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop the backend if the session is active.
    pub fn stop(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            self.backend.stop()?;
        }
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            drop(self.stop());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Counts start and stop calls.
    #[derive(Debug, Default)]
    struct Counting {
        /// Shared (starts, stops) counters.
        calls: Arc<Mutex<(u32, u32)>>,
    }

    impl BackendControl for Counting {
        fn start(&mut self) -> Result<()> {
            self.calls.lock().unwrap().0 += 1;
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.calls.lock().unwrap().1 += 1;
            Ok(())
        }
    }

    #[test]
    fn session_pairs_start_and_stop() -> Result<()> {
        let calls = Arc::new(Mutex::new((0, 0)));
        {
            let mut s = TerminalSession::new(Box::new(Counting {
                calls: calls.clone(),
            }))?;
            assert!(s.is_active());
            s.stop()?;
            s.stop()?;
            assert!(!s.is_active());
        }
        assert_eq!(*calls.lock().unwrap(), (1, 1));

        {
            let _s = TerminalSession::new(Box::new(Counting {
                calls: calls.clone(),
            }))?;
        }
        assert_eq!(*calls.lock().unwrap(), (2, 2));
        Ok(())
    }
}
