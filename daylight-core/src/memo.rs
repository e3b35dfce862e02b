//! Single-flight memo cell
//!
//! Holds the last key and the value computed for it. A read with the same
//! key returns the stored value; a read with a different key runs the
//! computation once and replaces the stored pair.
//!
//! The async mutex is held across the computation, so concurrent readers
//! queue behind the in-flight call and then observe its stored value instead
//! of starting their own. If the computing future is dropped mid-flight,
//! nothing is stored and the next reader computes again.
//!
//! # Example
//!
//! ```ignore
//! let memo: Memo<u32, String> = Memo::new();
//! let a = memo.get_or_compute(1, || async { "one".to_string() }).await;
//! let b = memo.get_or_compute(1, || async { unreachable!() }).await;
//! assert_eq!(a, b);
//! ```

use std::future::Future;

use tokio::sync::Mutex;
use tracing::trace;

pub struct Memo<K, V> {
    slot: Mutex<Option<(K, V)>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<K, V> Memo<K, V>
where
    K: PartialEq + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value for `key`, computing it only if the stored key differs.
    pub async fn get_or_compute<F, Fut>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let mut slot = self.slot.lock().await;
        if let Some((stored_key, value)) = slot.as_ref() {
            if *stored_key == key {
                trace!(?key, "memo hit");
                return value.clone();
            }
        }

        trace!(?key, "memo miss");
        let value = compute().await;
        *slot = Some((key, value.clone()));
        value
    }

    /// Current key and value, without computing anything
    pub async fn peek(&self) -> Option<(K, V)> {
        self.slot.lock().await.clone()
    }

    /// Drop the stored pair so the next read recomputes
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }
}
