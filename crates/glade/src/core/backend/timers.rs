use std::{
    cmp::Ordering,
    collections::binary_heap::BinaryHeap,
    time::{Duration, Instant},
};

use crate::TimerId;

/// A timer waiting for its deadline.
#[derive(Debug)]
struct PendingTimer {
    /// Deadline.
    time: Instant,
    /// Timer identifier.
    id: TimerId,
}

impl PartialEq for PendingTimer {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.id == other.id
    }
}

impl Eq for PendingTimer {}

/// Reverse order so timers with the closest deadline are at the top.
impl PartialOrd for PendingTimer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reverse order so timers with the closest deadline are at the top. Ties
/// fire in scheduling order.
impl Ord for PendingTimer {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// A heap that tracks pending timer deadlines and hands out timer ids.
#[derive(Default, Debug)]
pub struct TimerHeap {
    /// Pending timer heap.
    timers: BinaryHeap<PendingTimer>,
    /// Last id handed out.
    last: u64,
}

impl TimerHeap {
    /// Schedule a timer relative to an explicit time base.
    fn schedule_at(&mut self, now: Instant, delay: Duration) -> TimerId {
        self.last += 1;
        let id = TimerId(self.last);
        self.timers.push(PendingTimer {
            time: now + delay,
            id,
        });
        id
    }

    /// Schedule a timer to fire after `delay`.
    pub fn schedule(&mut self, delay: Duration) -> TimerId {
        self.schedule_at(Instant::now(), delay)
    }

    /// Calculate the wait time relative to a given timestamp.
    fn wait_at(&self, now: Instant) -> Option<Duration> {
        self.timers.peek().map(|top| {
            top.time
                .checked_duration_since(now)
                .unwrap_or(Duration::ZERO)
        })
    }

    /// Retrieve the current shortest wait time. We return None if no timers
    /// are waiting, and a duration of 0 if the top-most deadline is in the
    /// past.
    pub fn current_wait(&self) -> Option<Duration> {
        self.wait_at(Instant::now())
    }

    /// Collect due timers relative to a given timestamp.
    fn collect_at(&mut self, now: Instant) -> Vec<TimerId> {
        let mut v = vec![];
        while let Some(t) = self.timers.pop() {
            if t.time <= now {
                v.push(t.id);
            } else {
                // Put it back on the heap.
                self.timers.push(t);
                break;
            }
        }
        v
    }

    /// Remove and return every timer whose deadline has passed, earliest
    /// first.
    pub fn collect(&mut self) -> Vec<TimerId> {
        self.collect_at(Instant::now())
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True if no timer is pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
