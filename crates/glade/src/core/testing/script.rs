use std::{collections::VecDeque, time::Duration};

use crate::{
    TimerId,
    error::{Error, Result},
    event::{EventSource, RawEvent},
};

/// An event source that replays a fixed script.
///
/// Once the script is exhausted the source reports [`RawEvent::Terminate`],
/// or the configured error. Timers are numbered from 1 and recorded; with
/// auto-firing enabled, every scheduled timer is appended to the script as if
/// its delay elapsed after all events queued so far.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    /// Events still to be delivered.
    events: VecDeque<RawEvent>,
    /// Timers scheduled so far.
    timers: Vec<(TimerId, Duration)>,
    /// Append a firing for each scheduled timer.
    auto_fire: bool,
    /// Reported instead of terminate once the script runs out.
    error: Option<Error>,
}

impl ScriptedSource {
    /// A source replaying these events.
    pub fn new(events: impl IntoIterator<Item = RawEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Fire every timer after the events queued when it was scheduled.
    pub fn with_auto_fire(mut self) -> Self {
        self.auto_fire = true;
        self
    }

    /// Fail with this error once the script runs out.
    pub fn with_error(mut self, e: Error) -> Self {
        self.error = Some(e);
        self
    }

    /// Queue another event.
    pub fn push(&mut self, event: RawEvent) {
        self.events.push_back(event);
    }

    /// Events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// Every timer scheduled so far, with its delay.
    pub fn timers(&self) -> &[(TimerId, Duration)] {
        &self.timers
    }

    /// The most recently scheduled timer.
    pub fn last_timer(&self) -> Option<TimerId> {
        self.timers.last().map(|(id, _)| *id)
    }
}

impl EventSource for ScriptedSource {
    fn next(&mut self) -> Result<RawEvent> {
        match self.events.pop_front() {
            Some(e) => Ok(e),
            None => match &self.error {
                Some(e) => Err(e.clone()),
                None => Ok(RawEvent::Terminate),
            },
        }
    }

    fn start_timer(&mut self, delay: Duration) -> Result<TimerId> {
        let id = TimerId(self.timers.len() as u64 + 1);
        self.timers.push((id, delay));
        if self.auto_fire {
            self.events.push_back(RawEvent::Timer(id));
        }
        Ok(id)
    }
}
