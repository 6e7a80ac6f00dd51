//! Deadline-ordered timer queue.

use super::{TimerCallback, TimerHandle};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Pending callbacks keyed by `(deadline, id)`.
///
/// Deadlines are offsets from the owning scheduler's epoch. Ids grow
/// monotonically, so callbacks with equal deadlines run in scheduling order.
#[derive(Default)]
pub(super) struct TimerQueue {
    next_id: u64,
    entries: BTreeMap<(Duration, u64), TimerCallback>,
    deadlines: HashMap<u64, Duration>,
}

impl TimerQueue {
    pub(super) fn push(&mut self, deadline: Duration, callback: TimerCallback) -> TimerHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.insert((deadline, id), callback);
        self.deadlines.insert(id, deadline);
        TimerHandle(id)
    }

    /// Removes a pending entry. Returns `false` for unknown handles.
    pub(super) fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => self.entries.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }

    /// Pops the earliest entry whose deadline is at or before `now`.
    pub(super) fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimerHandle, TimerCallback)> {
        let (&(deadline, id), _) = self.entries.first_key_value()?;
        if deadline > now {
            return None;
        }
        let callback = self.entries.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        Some((deadline, TimerHandle(id), callback))
    }

    pub(super) fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}
