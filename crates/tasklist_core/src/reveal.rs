//! Fire-once deferred callback for the cosmetic delayed-visibility
//! flag. Deliberately decoupled from the task list store: it must never
//! influence persistence timing or list state.

use std::thread;
use std::time::Duration;

/// Runs `callback` once after `delay` on a detached timer thread. The
/// returned handle can be joined by callers that need to wait for the
/// flip, and dropped by callers that do not.
pub fn schedule<F>(delay: Duration, callback: F) -> thread::JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    thread::spawn(move || {
        thread::sleep(delay);
        callback();
    })
}
