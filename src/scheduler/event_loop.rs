//! Wall-clock scheduler.

use super::queue::TimerQueue;
use super::{Scheduler, TimerCallback, TimerHandle};
use std::cell::RefCell;
use std::time::{Duration, Instant};

/// Single-threaded event loop driven by the system monotonic clock.
///
/// Timers are stored relative to the instant the loop was created. Nothing runs
/// until the owner calls [`turn`](Self::turn) or
/// [`run_until_idle`](Self::run_until_idle), which keeps the "settles after the
/// current turn" guarantee for zero-delay timers.
///
/// # Example
///
/// ```rust
/// use hooklab::scheduler::{EventLoop, Scheduler};
/// use std::time::Duration;
///
/// let event_loop = EventLoop::new();
/// event_loop.after(Duration::from_millis(5), Box::new(|| println!("tick")));
/// assert_eq!(event_loop.run_until_idle(), 1);
/// ```
pub struct EventLoop {
    epoch: Instant,
    queue: RefCell<TimerQueue>,
}

impl EventLoop {
    /// Creates an empty loop whose epoch is "now".
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            queue: RefCell::new(TimerQueue::default()),
        }
    }

    /// Time elapsed since the loop was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.epoch.elapsed()
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs every callback that is already due, without sleeping.
    pub fn turn(&self) -> usize {
        let mut fired = 0;
        while let Some(callback) = self.pop_due(self.elapsed()) {
            callback();
            fired += 1;
        }
        fired
    }

    /// Runs callbacks until the queue is empty, sleeping until each deadline.
    pub fn run_until_idle(&self) -> usize {
        let _span = tracing::debug_span!("event_loop_run", pending = self.pending()).entered();

        let mut fired = 0;
        loop {
            let next = self.queue.borrow().next_deadline();
            let Some(deadline) = next else {
                tracing::debug!(fired, "event loop idle");
                return fired;
            };

            let wait = deadline.saturating_sub(self.elapsed());
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            fired += self.turn();
        }
    }

    fn pop_due(&self, now: Duration) -> Option<TimerCallback> {
        let (_, handle, callback) = self.queue.borrow_mut().pop_due(now)?;
        tracing::trace!(timer = handle.id(), "timer fired");
        Some(callback)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for EventLoop {
    fn after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let deadline = self.elapsed().saturating_add(delay);
        let handle = self.queue.borrow_mut().push(deadline, callback);
        tracing::trace!(timer = handle.id(), delay = ?delay, "timer scheduled");
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let removed = self.queue.borrow_mut().cancel(handle);
        tracing::trace!(timer = handle.id(), removed, "timer cancelled");
    }
}

impl std::fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("elapsed", &self.elapsed())
            .field("pending", &self.pending())
            .finish()
    }
}
