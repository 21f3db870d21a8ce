use std::time::Duration;

use super::keyed::KeyedDebouncer;
use crate::key::{DebounceKey, Symbol};
use crate::timer::{Timer, TokioTimer};

/// Debounces a single stream of calls.
///
/// Behaves like a [`KeyedDebouncer`] with one implicit key: each
/// [`debounce`](Self::debounce) restarts the window, and only the arguments of
/// the last call reach the callback.
pub struct Debouncer<A, T: Timer = TokioTimer> {
    keyed: KeyedDebouncer<A, T>,
    key: DebounceKey,
}

impl<A, T: Timer> Clone for Debouncer<A, T> {
    fn clone(&self) -> Self {
        Self {
            keyed: self.keyed.clone(),
            key: self.key.clone(),
        }
    }
}

impl<A> Debouncer<A, TokioTimer>
where
    A: Send + 'static,
{
    /// Create a debouncer driven by the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new<F>(callback: F, delay: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::from_keyed(KeyedDebouncer::new(callback, delay))
    }
}

impl<A, T> Debouncer<A, T>
where
    A: Send + 'static,
    T: Timer,
{
    pub fn with_timer<F>(timer: T, callback: F, delay: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::from_keyed(KeyedDebouncer::with_timer(timer, callback, delay))
    }

    pub(crate) fn from_keyed(keyed: KeyedDebouncer<A, T>) -> Self {
        Self {
            keyed,
            key: DebounceKey::from(Symbol::with_description("debounce")),
        }
    }

    pub fn delay(&self) -> Duration {
        self.keyed.delay()
    }

    /// Restart the window with `args` as the pending arguments.
    pub fn debounce(&self, args: A) {
        self.keyed.debounce_valid(self.key.clone(), args);
    }

    /// Discard the pending call. Returns `false` when idle.
    pub fn cancel(&self) -> bool {
        self.keyed.cancel(&self.key)
    }

    /// Run the pending call now. Returns `false` when idle.
    pub fn flush(&self) -> bool {
        self.keyed.flush(&self.key)
    }

    pub fn is_pending(&self) -> bool {
        self.keyed.is_pending(&self.key)
    }

    /// Cancel the pending call and release this handle.
    pub fn dispose(self) {
        self.cancel();
    }
}

impl<A: Send + 'static, T: Timer> std::fmt::Debug for Debouncer<A, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.keyed.delay())
            .field("pending", &self.keyed.is_pending(&self.key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::<u32>::new()));
        let sink = calls.clone();
        (calls, move |n| sink.lock().push(n))
    }

    #[tokio::test(start_paused = true)]
    async fn delivers_only_the_last_call() {
        let (calls, callback) = recorder();
        let debouncer = Debouncer::new(callback, Duration::from_millis(10));

        debouncer.debounce(1);
        debouncer.debounce(2);
        debouncer.debounce(3);
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(*calls.lock(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn flush_and_cancel_on_idle_are_no_ops() {
        let (calls, callback) = recorder();
        let debouncer = Debouncer::new(callback, Duration::from_millis(10));

        assert!(!debouncer.flush());
        assert!(!debouncer.cancel());

        debouncer.debounce(7);
        assert!(debouncer.flush());
        assert!(!debouncer.flush());
        assert_eq!(*calls.lock(), vec![7]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_the_pending_call() {
        let (calls, callback) = recorder();
        let debouncer = Debouncer::new(callback, Duration::from_millis(10));

        debouncer.debounce(1);
        assert!(debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(calls.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn debug_shows_delay_and_pending_state() {
        let (_calls, callback) = recorder();
        let debouncer = Debouncer::new(callback, Duration::from_millis(10));
        assert_eq!(
            format!("{:?}", debouncer),
            "Debouncer { delay: 10ms, pending: false }"
        );

        debouncer.debounce(1);
        assert_eq!(
            format!("{:?}", debouncer),
            "Debouncer { delay: 10ms, pending: true }"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_cancels_for_every_clone() {
        let (calls, callback) = recorder();
        let debouncer = Debouncer::new(callback, Duration::from_millis(10));
        let clone = debouncer.clone();

        clone.debounce(1);
        debouncer.dispose();
        assert!(!clone.is_pending());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(calls.lock().is_empty());
    }
}
