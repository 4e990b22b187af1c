//! Deferred effects on a virtual clock
//!
//! Messages that fade, the travel hop and level reveals all happen "a bit
//! later". Rather than real timers the game keeps a queue of effects keyed by
//! the virtual time they fall due; the host moves the clock forward.

use std::time::Duration;

/// An effect waiting for its moment
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending<T> {
    due: Duration,
    task: T,
}

/// Chronologically ordered queue of deferred tasks
#[derive(Debug, Clone)]
pub struct Schedule<T> {
    now: Duration,
    pending: Vec<Pending<T>>,
}

impl<T> Schedule<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            pending: Vec::new(),
        }
    }

    /// Virtual time elapsed since the schedule was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue `task` to run `delay` from now
    pub fn after(&mut self, delay: Duration, task: T) {
        let due = self.now + delay;
        // Insert in chronological order; equal due times keep scheduling order
        let pos = self
            .pending
            .iter()
            .position(|p| p.due > due)
            .unwrap_or(self.pending.len());
        self.pending.insert(pos, Pending { due, task });
    }

    /// When the earliest pending task falls due
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.first().map(|p| p.due)
    }

    /// Pop the earliest task if it is due at or before `until`.
    ///
    /// The clock moves to the task's due time so anything it schedules is
    /// measured from the moment it fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        if self.pending.first()?.due > until {
            return None;
        }
        let Pending { due, task } = self.pending.remove(0);
        self.now = self.now.max(due);
        Some(task)
    }

    /// Move the clock forward to `to` without running anything
    pub fn set_now(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Schedule<T> {
    fn default() -> Self {
        Self::new()
    }
}
