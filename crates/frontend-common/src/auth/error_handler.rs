//! Global session-invalidation handler
//!
//! Lets the API call layer report a rejected credential without every
//! component wiring its own error handling. The session provider registers
//! the callback on mount and removes it on unmount.

use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static INVALIDATED_CALLBACK: RefCell<Option<Rc<dyn Fn()>>> = const { RefCell::new(None) };
}

/// Register the invalidation callback
pub fn set_session_invalidated_callback(callback: Rc<dyn Fn()>) {
    INVALIDATED_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(callback);
    });
}

/// Remove the invalidation callback
pub fn clear_session_invalidated_callback() {
    INVALIDATED_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Report that the server no longer accepts the session credential
pub fn notify_session_invalidated() {
    INVALIDATED_CALLBACK.with(|cb| {
        if let Some(callback) = cb.borrow().as_ref() {
            callback();
        }
    });
}
