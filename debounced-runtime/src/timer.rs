//! Timer facility driving debounce windows.

use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;

/// Work run when a timer fires.
pub type Thunk = Box<dyn FnOnce() + Send + 'static>;

/// A one-shot, cancelable timer.
///
/// Debouncers call `arm` and `cancel` while holding their own state lock, so
/// neither may run the thunk synchronously. A canceled handle's thunk must
/// not start afterwards; an armed thunk runs at most once, no earlier than
/// `delay` after arming.
pub trait Timer: Send + Sync + 'static {
    type Handle: Send + 'static;

    /// Arm a timer that runs `thunk` once after `delay`.
    fn arm(&self, delay: Duration, thunk: Thunk) -> Self::Handle;

    /// Prevent a pending thunk from running.
    fn cancel(&self, handle: Self::Handle);
}

/// Timer backed by a Tokio runtime: one sleeping task per armed window.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime the caller is currently running on.
    pub fn try_current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::new)
    }

    /// Use the runtime the caller is currently running on.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Timer for TokioTimer {
    type Handle = JoinHandle<()>;

    fn arm(&self, delay: Duration, thunk: Thunk) -> Self::Handle {
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            thunk();
        })
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.abort();
    }
}
