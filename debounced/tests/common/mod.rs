//! Common test utilities shared across integration tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every callback invocation in order.
#[derive(Clone)]
pub struct Recorder<A> {
    calls: Arc<Mutex<Vec<A>>>,
}

impl<A: Clone + Send + 'static> Recorder<A> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A callback that appends its arguments to this recorder.
    pub fn callback(&self) -> impl Fn(A) + Send + Sync + 'static {
        let calls = self.calls.clone();
        move |args| calls.lock().unwrap().push(args)
    }

    pub fn calls(&self) -> Vec<A> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// Let paused Tokio time run forward by `ms` milliseconds.
pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
