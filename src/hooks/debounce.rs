//! Debounced value holder.
//!
//! A [`Debounced`] value trails a rapidly changing input and only settles once
//! the input has been quiet for the configured delay. Every [`update`] cancels
//! the pending settlement and schedules a fresh one, so a burst of updates
//! yields exactly one settlement, to the last value, one delay after the burst.
//!
//! ```text
//! update(1)  update(2)  update(3)            settle(3)
//!    |----------|----------|-------- delay -------|
//! ```
//!
//! Settlement always happens on a later scheduler turn, never inside
//! `update`, even with a zero delay.
//!
//! [`update`]: Debounced::update

use crate::domain::error::{HookError, Result};
use crate::scheduler::{SharedScheduler, TimerHandle};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

type SettleCallback<T> = Box<dyn FnMut(&T)>;

struct DebounceState<T> {
    current_input: T,
    settled: T,
    delay: Duration,
    pending: Option<TimerHandle>,
    /// Bumped on every schedule; a firing timer only settles if it is current.
    generation: u64,
    disposed: bool,
}

struct Shared<T> {
    state: RefCell<DebounceState<T>>,
    on_settle: RefCell<Option<SettleCallback<T>>>,
}

/// Converts a signed millisecond delay into a `Duration`.
///
/// # Errors
///
/// Returns [`HookError::InvalidArgument`] for negative delays.
pub fn delay_from_millis(delay_ms: i64) -> Result<Duration> {
    u64::try_from(delay_ms)
        .map(Duration::from_millis)
        .map_err(|_| HookError::InvalidArgument(format!("debounce delay must be >= 0, got {delay_ms}")))
}

/// A value that settles to its latest input after a quiet period.
///
/// The holder owns at most one pending timer at a time. Dropping the holder
/// (or calling [`dispose`](Self::dispose)) cancels it.
///
/// # Example
///
/// ```rust
/// use hooklab::hooks::Debounced;
/// use hooklab::scheduler::ManualScheduler;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let scheduler = Rc::new(ManualScheduler::new());
/// let mut search = Debounced::new(String::new(), 500, scheduler.clone())?;
///
/// search.update("r".to_string());
/// search.update("ru".to_string());
/// search.update("rust".to_string());
/// assert_eq!(search.read(), "");
///
/// scheduler.advance(Duration::from_millis(500));
/// assert_eq!(search.read(), "rust");
/// # Ok::<(), hooklab::HookError>(())
/// ```
pub struct Debounced<T: Clone + 'static> {
    shared: Rc<Shared<T>>,
    scheduler: SharedScheduler,
}

impl<T: Clone + 'static> Debounced<T> {
    /// Creates a holder seeded with `initial` and a delay in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidArgument`] if `delay_ms` is negative.
    pub fn new(initial: T, delay_ms: i64, scheduler: SharedScheduler) -> Result<Self> {
        let delay = delay_from_millis(delay_ms)?;
        Ok(Self::with_delay(initial, delay, scheduler))
    }

    /// Creates a holder with an already validated delay.
    #[must_use]
    pub fn with_delay(initial: T, delay: Duration, scheduler: SharedScheduler) -> Self {
        tracing::debug!(delay = ?delay, "creating debounced value");
        let state = DebounceState {
            current_input: initial.clone(),
            settled: initial,
            delay,
            pending: None,
            generation: 0,
            disposed: false,
        };
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(state),
                on_settle: RefCell::new(None),
            }),
            scheduler,
        }
    }

    /// Records a new input and restarts the quiet period.
    ///
    /// Equal values are not special-cased: they reset the timer too. Updates
    /// after disposal are ignored.
    pub fn update(&mut self, value: T) {
        if self.shared.state.borrow().disposed {
            tracing::debug!("ignoring update on disposed debounced value");
            return;
        }
        self.shared.state.borrow_mut().current_input = value;
        self.reschedule();
    }

    /// Returns the settled value.
    #[must_use]
    pub fn read(&self) -> T {
        self.shared.state.borrow().settled.clone()
    }

    /// Returns the latest input, settled or not.
    #[must_use]
    pub fn input(&self) -> T {
        self.shared.state.borrow().current_input.clone()
    }

    /// Returns `true` while a settlement is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.shared.state.borrow().pending.is_some()
    }

    /// Current stabilization window.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.shared.state.borrow().delay
    }

    /// Changes the stabilization window.
    ///
    /// A pending settlement is rescheduled with the new delay, measured from
    /// now. Without pending input nothing is scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidArgument`] if `delay_ms` is negative.
    pub fn set_delay(&mut self, delay_ms: i64) -> Result<()> {
        let delay = delay_from_millis(delay_ms)?;
        let was_pending = {
            let mut state = self.shared.state.borrow_mut();
            state.delay = delay;
            state.pending.is_some() && !state.disposed
        };
        if was_pending {
            self.reschedule();
        }
        Ok(())
    }

    /// Registers a callback invoked with the value at every settlement.
    ///
    /// Replaces any previously registered callback. The callback may call back
    /// into this holder's read-only accessors.
    pub fn on_settle(&mut self, callback: impl FnMut(&T) + 'static) {
        *self.shared.on_settle.borrow_mut() = Some(Box::new(callback));
    }

    /// Cancels any pending settlement and stops accepting updates.
    ///
    /// Idempotent.
    pub fn dispose(&mut self) {
        let pending = {
            let mut state = self.shared.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.pending.take()
        };
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
        tracing::debug!(cancelled = pending.is_some(), "debounced value disposed");
    }

    /// Returns `true` once the holder has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.shared.state.borrow().disposed
    }

    fn reschedule(&mut self) {
        let (previous, delay, generation) = {
            let mut state = self.shared.state.borrow_mut();
            state.generation = state.generation.wrapping_add(1);
            (state.pending.take(), state.delay, state.generation)
        };

        if let Some(handle) = previous {
            self.scheduler.cancel(handle);
        }

        let weak = Rc::downgrade(&self.shared);
        let handle = self
            .scheduler
            .after(delay, Box::new(move || settle(&weak, generation)));

        self.shared.state.borrow_mut().pending = Some(handle);
        tracing::trace!(timer = handle.id(), generation, "settlement scheduled");
    }
}

/// Timer body: copies the current input into the settled value.
fn settle<T: Clone>(weak: &Weak<Shared<T>>, generation: u64) {
    let Some(shared) = weak.upgrade() else {
        return;
    };

    let value = {
        let mut state = shared.state.borrow_mut();
        if state.disposed || state.generation != generation {
            tracing::trace!(generation, "stale settlement skipped");
            return;
        }
        state.pending = None;
        state.settled = state.current_input.clone();
        state.settled.clone()
    };
    tracing::debug!(generation, "debounced value settled");

    // Taken out while running so the callback may re-register itself.
    let callback = shared.on_settle.borrow_mut().take();
    if let Some(mut callback) = callback {
        callback(&value);
        let mut slot = shared.on_settle.borrow_mut();
        if slot.is_none() {
            *slot = Some(callback);
        }
    }
}

impl<T: Clone + 'static> Drop for Debounced<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T: Clone + std::fmt::Debug + 'static> std::fmt::Debug for Debounced<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("Debounced")
            .field("current_input", &state.current_input)
            .field("settled", &state.settled)
            .field("delay", &state.delay)
            .field("pending", &state.pending)
            .field("disposed", &state.disposed)
            .finish()
    }
}
