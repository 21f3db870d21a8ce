use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::InvalidKeyError;
use crate::key::{DebounceKey, IntoDebounceKey};
use crate::timer::{Timer, TokioTimer};

/// Callback invoked with the arguments of the last call in a burst
pub type Callback<A> = Arc<dyn Fn(A) + Send + Sync + 'static>;

/// One in-flight debounce window
struct PendingEntry<A, H> {
    timer: H,
    last_args: A,
    callback: Callback<A>,
    /// Identifies the arming of `timer`; a thunk from an older arming is stale.
    generation: u64,
}

struct SchedulerState<A, H> {
    entries: HashMap<DebounceKey, PendingEntry<A, H>>,
    next_generation: u64,
}

/// A pending invocation taken out of the state, ready to be delivered
struct Delivery<A> {
    args: A,
    callback: Callback<A>,
}

impl<A> Delivery<A> {
    fn run(self) {
        (self.callback)(self.args);
    }
}

struct Inner<A, T: Timer> {
    state: Mutex<SchedulerState<A, T::Handle>>,
    timer: T,
    callback: Callback<A>,
    delay: Duration,
}

impl<A, T: Timer> Inner<A, T> {
    /// Timer thunk body: deliver the window only if it is still the current one.
    fn fire(&self, key: &DebounceKey, generation: u64) {
        let entry = {
            let mut state = self.state.lock();
            let current = state
                .entries
                .get(key)
                .is_some_and(|entry| entry.generation == generation);
            if current {
                state.entries.remove(key)
            } else {
                None
            }
        };

        if let Some(entry) = entry {
            trace!(key = %key, generation, "Debounce window elapsed");
            (entry.callback)(entry.last_args);
        }
    }

    /// Remove the entry for `key` and cancel its timer.
    fn take(&self, key: &DebounceKey) -> Option<Delivery<A>> {
        let mut state = self.state.lock();
        let entry = state.entries.remove(key)?;
        self.timer.cancel(entry.timer);
        Some(Delivery {
            args: entry.last_args,
            callback: entry.callback,
        })
    }

    fn take_all(&self) -> usize {
        let mut state = self.state.lock();
        let count = state.entries.len();
        for (_, entry) in state.entries.drain() {
            self.timer.cancel(entry.timer);
        }
        count
    }
}

impl<A, T: Timer> Drop for Inner<A, T> {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        for (_, entry) in state.entries.drain() {
            self.timer.cancel(entry.timer);
        }
    }
}

/// Debounces calls independently per key.
///
/// Every call to [`schedule`](Self::schedule) or [`debounce`](Self::debounce)
/// for a key restarts that key's window and replaces its pending arguments.
/// When a window elapses without further calls, the callback runs once with
/// the arguments of the last call. Windows for different keys never affect
/// each other.
///
/// Clones share the same pending windows. When the last clone is dropped all
/// outstanding timers are canceled without invoking their callbacks.
///
/// ```rust,no_run
/// use debounced_runtime::KeyedDebouncer;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let saver = KeyedDebouncer::new(
///     |body: String| println!("saving {body}"),
///     Duration::from_millis(300),
/// );
///
/// saver.debounce("doc-1", "draft".to_string())?;
/// saver.debounce("doc-1", "final draft".to_string())?;
/// saver.flush("doc-1"); // prints "saving final draft" right away
/// # Ok(())
/// # }
/// ```
pub struct KeyedDebouncer<A, T: Timer = TokioTimer> {
    inner: Arc<Inner<A, T>>,
}

impl<A, T: Timer> Clone for KeyedDebouncer<A, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A> KeyedDebouncer<A, TokioTimer>
where
    A: Send + 'static,
{
    /// Create a debouncer driven by the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime. Use
    /// [`with_timer`](Self::with_timer) or the builder to avoid this.
    pub fn new<F>(callback: F, delay: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::with_timer(TokioTimer::current(), callback, delay)
    }
}

impl<A, T> KeyedDebouncer<A, T>
where
    A: Send + 'static,
    T: Timer,
{
    /// Create a debouncer with a default callback and delay used by
    /// [`debounce`](Self::debounce).
    pub fn with_timer<F>(timer: T, callback: F, delay: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::from_parts(timer, Arc::new(callback), delay)
    }

    pub(crate) fn from_parts(timer: T, callback: Callback<A>, delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(SchedulerState {
                    entries: HashMap::new(),
                    next_generation: 0,
                }),
                timer,
                callback,
                delay,
            }),
        }
    }

    /// The delay used by [`debounce`](Self::debounce).
    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// Debounce a call for `key` with the default callback and delay.
    pub fn debounce<K>(&self, key: K, args: A) -> Result<(), InvalidKeyError>
    where
        K: IntoDebounceKey,
    {
        let key = key.into_debounce_key()?;
        self.debounce_valid(key, args);
        Ok(())
    }

    /// Start or restart the debounce window for `key`.
    ///
    /// Any pending window for `key` is canceled and its arguments discarded.
    /// After `delay` without another call for `key`, `callback` runs once with
    /// `args`. An invalid key is rejected before any state changes.
    pub fn schedule<K, F>(
        &self,
        key: K,
        callback: F,
        args: A,
        delay: Duration,
    ) -> Result<(), InvalidKeyError>
    where
        K: IntoDebounceKey,
        F: Fn(A) + Send + Sync + 'static,
    {
        self.schedule_callback(key, Arc::new(callback), args, delay)
    }

    /// Like [`schedule`](Self::schedule) with an already shared callback.
    pub fn schedule_callback<K>(
        &self,
        key: K,
        callback: Callback<A>,
        args: A,
        delay: Duration,
    ) -> Result<(), InvalidKeyError>
    where
        K: IntoDebounceKey,
    {
        let key = key.into_debounce_key()?;
        self.schedule_valid(key, callback, args, delay);
        Ok(())
    }

    /// Debounce with the default callback and delay for an already validated key.
    pub(crate) fn debounce_valid(&self, key: DebounceKey, args: A) {
        let callback = self.inner.callback.clone();
        self.schedule_valid(key, callback, args, self.inner.delay);
    }

    fn schedule_valid(&self, key: DebounceKey, callback: Callback<A>, args: A, delay: Duration) {
        let mut state = self.inner.state.lock();
        state.next_generation += 1;
        let generation = state.next_generation;

        let weak: Weak<Inner<A, T>> = Arc::downgrade(&self.inner);
        let thunk_key = key.clone();
        let timer = self.inner.timer.arm(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.fire(&thunk_key, generation);
                }
            }),
        );

        debug!(
            key = %key,
            ?delay,
            generation,
            "Debounce scheduled"
        );

        let entry = PendingEntry {
            timer,
            last_args: args,
            callback,
            generation,
        };
        if let Some(previous) = state.entries.insert(key, entry) {
            self.inner.timer.cancel(previous.timer);
        }
    }

    /// Discard the pending window for `key` without invoking its callback.
    ///
    /// Returns `false` when nothing was pending, including for invalid keys.
    pub fn cancel<K>(&self, key: K) -> bool
    where
        K: IntoDebounceKey,
    {
        let Ok(key) = key.into_debounce_key() else {
            return false;
        };
        let canceled = self.inner.take(&key).is_some();
        if canceled {
            debug!(key = %key, "Debounce canceled");
        }
        canceled
    }

    /// Invoke the pending callback for `key` now, with its latest arguments.
    ///
    /// The callback runs on the calling thread before `flush` returns. Returns
    /// `false` when nothing was pending.
    pub fn flush<K>(&self, key: K) -> bool
    where
        K: IntoDebounceKey,
    {
        let Ok(key) = key.into_debounce_key() else {
            return false;
        };
        match self.inner.take(&key) {
            Some(delivery) => {
                debug!(key = %key, "Debounce flushed");
                delivery.run();
                true
            }
            None => false,
        }
    }

    /// Flush every key pending at the time of the call.
    ///
    /// Keys scheduled by callbacks while this runs stay pending. Returns the
    /// number of callbacks invoked.
    pub fn flush_all(&self) -> usize {
        let keys = self.pending_keys();
        let mut flushed = 0;
        for key in keys {
            if let Some(delivery) = self.inner.take(&key) {
                delivery.run();
                flushed += 1;
            }
        }
        if flushed > 0 {
            debug!(flushed, "Debounce flushed all");
        }
        flushed
    }

    /// Cancel every pending window. Returns the number of windows discarded.
    pub fn cancel_all(&self) -> usize {
        let canceled = self.inner.take_all();
        if canceled > 0 {
            debug!(canceled, "Debounce canceled all");
        }
        canceled
    }

    /// Cancel every pending window and release this handle.
    pub fn dispose(self) {
        self.cancel_all();
    }

    pub fn is_pending<K>(&self, key: K) -> bool
    where
        K: IntoDebounceKey,
    {
        match key.into_debounce_key() {
            Ok(key) => self.inner.state.lock().entries.contains_key(&key),
            Err(_) => false,
        }
    }

    /// Snapshot of the keys with a pending window, in no particular order.
    pub fn pending_keys(&self) -> Vec<DebounceKey> {
        self.inner.state.lock().entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().entries.is_empty()
    }
}

impl<A, T: Timer> std::fmt::Debug for KeyedDebouncer<A, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("KeyedDebouncer")
            .field("delay", &self.inner.delay)
            .field("pending", &state.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
