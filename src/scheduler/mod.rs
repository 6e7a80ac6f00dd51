//! Host scheduler abstraction for deferred callbacks.
//!
//! Debounced values never talk to a clock directly. They ask a [`Scheduler`]
//! to run a callback after a delay and cancel it again when new input arrives.
//! The scheduler owns the notion of time, which lets tests drive a virtual
//! clock while applications run on the wall clock.
//!
//! # Execution Model
//!
//! All schedulers follow a single-threaded cooperative model: callbacks run to
//! completion one at a time, in deadline order, and only when the owner turns
//! the loop (`advance`, `turn`, `run_until_idle`). A callback scheduled with a
//! zero delay therefore never runs inside the call that scheduled it.
//!
//! # Modules
//!
//! - `queue`: Deadline-ordered timer queue shared by both implementations
//! - `manual`: [`ManualScheduler`], a virtual clock for deterministic tests
//! - `event_loop`: [`EventLoop`], a wall-clock loop that sleeps between timers

mod event_loop;
mod manual;
mod queue;

pub use event_loop::EventLoop;
pub use manual::ManualScheduler;

use std::rc::Rc;
use std::time::Duration;

/// Opaque identifier of a scheduled callback.
///
/// Handles are unique per scheduler instance and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Returns the raw numeric id, mainly useful for log fields.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A boxed one-shot timer callback.
pub type TimerCallback = Box<dyn FnOnce()>;

/// Capability to run callbacks after a delay.
///
/// # Contract
///
/// - `after` never runs the callback synchronously, even for `Duration::ZERO`.
/// - `cancel` is idempotent: cancelling a timer that already fired or was
///   already cancelled is a no-op.
/// - Implementations must tolerate callbacks that call back into the
///   scheduler (scheduling or cancelling other timers) while they run.
pub trait Scheduler {
    /// Schedules `callback` to run once `delay` has elapsed.
    fn after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancels a previously scheduled callback.
    fn cancel(&self, handle: TimerHandle);
}

/// Reference-counted scheduler shared between the loop owner and its clients.
pub type SharedScheduler = Rc<dyn Scheduler>;
