//! Cooperative cancellation for the monitor loop
//!
//! A single flag shared between the signal handler and the monitor. The monitor
//! polls it between cycle phases and during the tree walk, and sleeps on the
//! paired condition variable so an interval wait ends as soon as the flag is set.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancellation flag with an interruptible wait
#[derive(Clone, Default)]
pub struct CancellationToken {
    inner: Arc<TokenState>,
}

#[derive(Default)]
struct TokenState {
    cancelled: Mutex<bool>,
    wakeup: Condvar,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake every waiter
    pub fn cancel(&self) {
        let mut cancelled = self.inner.cancelled.lock();
        *cancelled = true;
        self.inner.wakeup.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.cancelled.lock()
    }

    /// Sleep for `timeout` or until cancelled, whichever comes first.
    ///
    /// Returns `true` if the wait ended because of cancellation.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut cancelled = self.inner.cancelled.lock();
        // Durations past the representable range wait for cancellation only
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            while !*cancelled {
                self.inner.wakeup.wait(&mut cancelled);
            }
            return true;
        };
        while !*cancelled {
            if self
                .inner
                .wakeup
                .wait_until(&mut cancelled, deadline)
                .timed_out()
            {
                break;
            }
        }
        *cancelled
    }
}
