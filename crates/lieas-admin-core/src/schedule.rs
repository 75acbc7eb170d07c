use std::collections::HashMap;
use std::fmt;

/// Identifies the element (or purpose) that owns a pending timer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(owner: impl Into<String>) -> Self {
        Self(owner.into())
    }

    /// Key for a named step of an owner's lifecycle, e.g. `alert-3:remove`.
    pub fn step(owner: &str, step: &str) -> Self {
        Self(format!("{owner}:{step}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One pending handle per key.
///
/// Handles are expected to cancel themselves on drop (as
/// `gloo_timers::callback::Timeout` does), so replacing or cancelling a
/// key cancels the timer it held.
pub struct KeyedTasks<H> {
    pending: HashMap<TaskKey, H>,
}

impl<H> Default for KeyedTasks<H> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<H> KeyedTasks<H> {
    /// Stores `handle` under `key`, returning the handle it replaced.
    pub fn schedule(&mut self, key: TaskKey, handle: H) -> Option<H> {
        let replaced = self.pending.insert(key.clone(), handle);
        if replaced.is_some() {
            tracing::debug!(key = %key, "replaced pending task");
        }
        replaced
    }

    pub fn cancel(&mut self, key: &TaskKey) -> Option<H> {
        self.pending.remove(key)
    }

    /// Cancels every key belonging to `owner` (the owner key and its steps).
    pub fn cancel_owner(&mut self, owner: &str) -> usize {
        let step_prefix = format!("{owner}:");
        let before = self.pending.len();
        self.pending
            .retain(|key, _| key.as_str() != owner && !key.as_str().starts_with(&step_prefix));
        before - self.pending.len()
    }

    /// Called by the task itself once it has run, so the handle is released
    /// without being cancelled twice.
    pub fn complete(&mut self, key: &TaskKey) -> Option<H> {
        self.pending.remove(key)
    }

    pub fn is_pending(&self, key: &TaskKey) -> bool {
        self.pending.contains_key(key)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Trailing-edge debounce.
///
/// Every call returns a ticket; when a timer fires it presents its ticket
/// and only the latest, not-yet-fired ticket runs the wrapped function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Debounce {
    latest: u64,
    fired: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

impl Debounce {
    pub fn call(&mut self) -> DebounceTicket {
        self.latest += 1;
        self.fired = false;
        DebounceTicket(self.latest)
    }

    pub fn fire(&mut self, ticket: DebounceTicket) -> bool {
        if ticket.0 != self.latest || self.fired {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Leading-edge throttle: the first call runs, later calls are dropped
/// until `limit_ms` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throttle {
    limit_ms: u64,
    reopens_at_ms: Option<u64>,
}

impl Throttle {
    pub fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            reopens_at_ms: None,
        }
    }

    pub fn try_acquire(&mut self, now_ms: u64) -> bool {
        if let Some(reopens_at) = self.reopens_at_ms {
            if now_ms < reopens_at {
                return false;
            }
        }
        self.reopens_at_ms = Some(now_ms.saturating_add(self.limit_ms));
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct CountingHandle(Rc<Cell<u32>>);

    impl Drop for CountingHandle {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn rescheduling_a_key_drops_the_previous_handle() {
        let dropped = Rc::new(Cell::new(0));
        let mut tasks = KeyedTasks::default();
        let key = TaskKey::new("toast-1");

        assert!(
            tasks
                .schedule(key.clone(), CountingHandle(dropped.clone()))
                .is_none()
        );
        drop(tasks.schedule(key.clone(), CountingHandle(dropped.clone())));
        assert_eq!(dropped.get(), 1);
        assert_eq!(tasks.pending(), 1);

        drop(tasks.cancel(&key));
        assert_eq!(dropped.get(), 2);
        assert!(!tasks.is_pending(&key));
    }

    #[test]
    fn cancel_owner_clears_all_steps() {
        let mut tasks = KeyedTasks::default();
        tasks.schedule(TaskKey::step("alert-1", "dismiss"), ());
        tasks.schedule(TaskKey::step("alert-1", "remove"), ());
        tasks.schedule(TaskKey::step("alert-10", "remove"), ());
        assert_eq!(tasks.cancel_owner("alert-1"), 2);
        assert!(tasks.is_pending(&TaskKey::step("alert-10", "remove")));
        assert!(tasks.complete(&TaskKey::step("alert-10", "remove")).is_some());
        assert_eq!(tasks.pending(), 0);
    }

    #[test]
    fn debounce_runs_only_the_latest_call_once() {
        let mut debounce = Debounce::default();
        let first = debounce.call();
        let second = debounce.call();
        assert!(!debounce.fire(first));
        assert!(debounce.fire(second));
        assert!(!debounce.fire(second));

        let third = debounce.call();
        assert!(debounce.fire(third));
    }

    #[test]
    fn throttle_admits_first_call_per_window() {
        let mut throttle = Throttle::new(100);
        assert!(throttle.try_acquire(0));
        assert!(!throttle.try_acquire(50));
        assert!(!throttle.try_acquire(99));
        assert!(throttle.try_acquire(100));
        assert!(!throttle.try_acquire(150));
    }
}
