//! Settle-after-this-tick work, stamped with the buffer generation it was
//! scheduled for. A step whose generation has been superseded is dropped.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::trace;

/// Delay before a boundary recovery is pushed back to the surface.
pub const RECOVERY_DELAY: Duration = Duration::ZERO;
/// Delay before decorations and caret are reapplied after regeneration.
pub const REGENERATION_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug)]
pub struct DeferredQueue<T> {
    pending: VecDeque<(u64, T)>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn schedule(&mut self, generation: u64, task: T) {
        self.pending.push_back((generation, task));
    }

    /// Drain the queue in FIFO order, keeping only tasks stamped with `current`.
    pub fn take_ready(&mut self, current: u64) -> Vec<T> {
        let mut ready = Vec::with_capacity(self.pending.len());
        for (generation, task) in self.pending.drain(..) {
            if generation == current {
                ready.push(task);
            } else {
                trace!(generation, current, "stale deferred step dropped");
            }
        }
        ready
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
