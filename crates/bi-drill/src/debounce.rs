//! Trailing-edge debouncing
//!
//! Chart libraries report drag selections as bursts of click events. A
//! debouncer keeps only the newest value of a burst and hands it out once the
//! quiet window has passed. There are no internal timers; the host loop
//! drives flushing by polling.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Coalesces rapid pushes into the single newest value
pub struct TrailingDebouncer<T> {
    window: Duration,
    pending: Mutex<Option<Pending<T>>>,
}

struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> TrailingDebouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    /// Record a value, superseding any pending one and restarting the window
    pub fn push(&self, value: T) {
        self.push_at(value, Instant::now());
    }

    pub fn push_at(&self, value: T, now: Instant) {
        *self.pending.lock() = Some(Pending {
            value,
            deadline: now + self.window,
        });
    }

    /// Take the pending value once its quiet window has passed
    pub fn poll(&self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&self, now: Instant) -> Option<T> {
        let mut pending = self.pending.lock();
        let due = matches!(pending.as_ref(), Some(entry) if now >= entry.deadline);
        if due {
            pending.take().map(|entry| entry.value)
        } else {
            None
        }
    }
}
