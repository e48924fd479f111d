use crate::error::{PointError, Result};
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Registry of mutually exclusive execution slots, one per key.
///
/// Slots are created lazily on first use and never removed, so the registry
/// grows with the set of keys seen. Acquisition is a single `try_lock`: a key
/// whose slot is already held fails with [`PointError::LockContention`]
/// instead of waiting. Different keys never contend.
pub struct LockRegistry<K> {
    slots: RwLock<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for LockRegistry<K> {
    fn default() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl<K> LockRegistry<K>
where
    K: Eq + Hash + Clone + Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `operation` while holding the slot for `key`.
    ///
    /// Once the slot is acquired the operation runs on its own task together
    /// with the slot guard, so it always runs to completion even if the
    /// caller stops waiting. The slot is released when that task finishes.
    /// The operation's result is returned unchanged.
    pub async fn run_exclusive<F, Fut, T>(&self, key: K, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let slot = self.slot(&key).await;
        let guard = slot.try_lock_owned().map_err(|_| {
            tracing::warn!(key = %key, "lock contention");
            PointError::LockContention(key.to_string())
        })?;
        let critical = operation();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            critical.await
        });
        handle.await?
    }

    /// Number of slots created so far.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn slot(&self, key: &K) -> Arc<Mutex<()>> {
        {
            let slots = self.slots.read().await;
            if let Some(slot) = slots.get(key) {
                return slot.clone();
            }
        }

        let mut slots = self.slots.write().await;
        slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
