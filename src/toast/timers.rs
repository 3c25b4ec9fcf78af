use std::collections::HashMap;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::{trace, warn};

use crate::types::ToastId;

/// Generation of an armed timer. Only the current generation may settle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerToken(u64);

struct PendingTimer {
    token: TimerToken,
    handle: AbortHandle,
}

/// One cancellable delayed action per toast id.
pub struct TimerRegistry {
    runtime: Option<Handle>,
    next_token: u64,
    timers: HashMap<ToastId, PendingTimer>,
}

impl TimerRegistry {
    /// Capture the ambient tokio runtime, if any.
    #[must_use]
    pub fn new() -> Self {
        Self::with_runtime(Handle::try_current().ok())
    }

    #[must_use]
    pub fn with_runtime(runtime: Option<Handle>) -> Self {
        Self {
            runtime,
            next_token: 0,
            timers: HashMap::new(),
        }
    }

    /// Arm `on_expire` to run once after `delay`, replacing any timer already
    /// armed for `id`.
    ///
    /// Returns `None` when no runtime is available to run the timer.
    pub fn schedule<F>(&mut self, id: ToastId, delay: Duration, on_expire: F) -> Option<TimerToken>
    where
        F: FnOnce(TimerToken) + Send + 'static,
    {
        self.cancel(&id);

        let Some(runtime) = self.runtime.as_ref() else {
            warn!(toast_id = %id, "no async runtime available; auto-dismiss disabled");
            return None;
        };

        self.next_token += 1;
        let token = TimerToken(self.next_token);
        let task = runtime.spawn(async move {
            sleep(delay).await;
            on_expire(token);
        });

        trace!(toast_id = %id, delay_ms = delay.as_millis(), "timer armed");
        self.timers.insert(
            id,
            PendingTimer {
                token,
                handle: task.abort_handle(),
            },
        );
        Some(token)
    }

    pub fn cancel(&mut self, id: &ToastId) -> bool {
        match self.timers.remove(id) {
            Some(pending) => {
                pending.handle.abort();
                trace!(toast_id = %id, "timer cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        for (_, pending) in self.timers.drain() {
            pending.handle.abort();
        }
        count
    }

    /// Forget the timer for `id` after it fired.
    ///
    /// Returns `false` when `token` is no longer the armed generation, i.e. the
    /// timer was cancelled or replaced while its task was already waking up.
    pub fn settle(&mut self, id: &ToastId, token: TimerToken) -> bool {
        if self.is_armed(id, token) {
            self.timers.remove(id);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_armed(&self, id: &ToastId, token: TimerToken) -> bool {
        self.timers.get(id).is_some_and(|pending| pending.token == token)
    }

    #[must_use]
    pub fn contains(&self, id: &ToastId) -> bool {
        self.timers.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
