//! Virtual-clock scheduler for deterministic tests and simulations.

use super::queue::TimerQueue;
use super::{Scheduler, TimerCallback, TimerHandle};
use std::cell::RefCell;
use std::time::Duration;

#[derive(Default)]
struct ManualInner {
    now: Duration,
    queue: TimerQueue,
}

/// Scheduler whose clock only moves when told to.
///
/// Time starts at zero. [`advance`](Self::advance) moves the clock forward and
/// runs every callback that falls due on the way, with the clock set to each
/// callback's deadline while it runs. Callbacks scheduled from inside a
/// callback are honoured within the same `advance` if they fall due before its
/// target.
///
/// # Example
///
/// ```rust
/// use hooklab::scheduler::{ManualScheduler, Scheduler};
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = fired.clone();
/// scheduler.after(Duration::from_millis(100), Box::new(move || flag.set(true)));
///
/// scheduler.advance(Duration::from_millis(99));
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    inner: RefCell<ManualInner>,
}

impl ManualScheduler {
    /// Creates a scheduler with its clock at zero and no pending timers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Moves the clock forward by `by`, running callbacks as they fall due.
    ///
    /// Returns the number of callbacks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now().saturating_add(by);
        let _span = tracing::trace_span!("manual_advance", target = ?target).entered();

        let mut fired = 0;
        while let Some(callback) = self.pop_due(target) {
            callback();
            fired += 1;
        }

        self.inner.borrow_mut().now = target;
        fired
    }

    /// Runs callbacks that are due at the current instant (zero-delay work).
    pub fn run_pending(&self) -> usize {
        self.advance(Duration::ZERO)
    }

    /// Runs every pending callback, jumping the clock from deadline to deadline.
    ///
    /// Callbacks that keep rescheduling themselves will keep this loop alive.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        loop {
            let next = self.inner.borrow().queue.next_deadline();
            let Some(deadline) = next else {
                return fired;
            };
            let by = deadline.saturating_sub(self.now());
            fired += self.advance(by);
        }
    }

    /// Pops the next due callback, releasing the borrow before it runs.
    fn pop_due(&self, target: Duration) -> Option<TimerCallback> {
        let mut inner = self.inner.borrow_mut();
        let (deadline, handle, callback) = inner.queue.pop_due(target)?;
        inner.now = deadline;
        tracing::trace!(timer = handle.id(), at = ?deadline, "timer fired");
        Some(callback)
    }
}

impl Scheduler for ManualScheduler {
    fn after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let deadline = inner.now.saturating_add(delay);
        let handle = inner.queue.push(deadline, callback);
        tracing::trace!(timer = handle.id(), delay = ?delay, "timer scheduled");
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let removed = self.inner.borrow_mut().queue.cancel(handle);
        tracing::trace!(timer = handle.id(), removed, "timer cancelled");
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}
