use super::*;

/// Runs `task` after `delay_ms`, replacing (and so cancelling) any timer
/// already pending under `key`.
pub(super) fn schedule(
    controller: &Rc<AdminController>,
    key: TaskKey,
    delay_ms: u32,
    task: impl FnOnce(&Rc<AdminController>) + 'static,
) {
    let weak = Rc::downgrade(controller);
    let fired_key = key.clone();
    let timeout = Timeout::new(delay_ms, move || {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        let finished = controller.timers.borrow_mut().complete(&fired_key);
        task(&controller);
        drop(finished);
    });
    controller.timers.borrow_mut().schedule(key, timeout);
}

pub(super) fn cancel(controller: &AdminController, key: &TaskKey) {
    controller.timers.borrow_mut().cancel(key);
}

fn now_ms() -> u64 {
    let now = js_sys::Date::now();
    if !now.is_finite() || now.is_sign_negative() {
        return 0;
    }
    now.floor() as u64
}

pub(super) fn debounced<T: 'static>(
    wait_ms: u32,
    callback: impl FnMut(T) + 'static,
) -> impl FnMut(T) + 'static {
    let state = Rc::new(RefCell::new(Debounce::default()));
    let callback = Rc::new(RefCell::new(callback));
    let mut pending: Option<Timeout> = None;
    move |value: T| {
        let ticket = state.borrow_mut().call();
        let state = Rc::clone(&state);
        let callback = Rc::clone(&callback);
        let timeout = Timeout::new(wait_ms, move || {
            if state.borrow_mut().fire(ticket) {
                (callback.borrow_mut())(value);
            }
        });
        // Dropping the previous timeout cancels it.
        drop(pending.replace(timeout));
    }
}

pub(super) fn throttled<T: 'static>(
    limit_ms: u32,
    mut callback: impl FnMut(T) + 'static,
) -> impl FnMut(T) + 'static {
    let mut throttle = Throttle::new(u64::from(limit_ms));
    move |value: T| {
        if throttle.try_acquire(now_ms()) {
            callback(value);
        }
    }
}
