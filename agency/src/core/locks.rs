//! Per-key async mutual exclusion
//!
//! Check-then-act sequences against one mission (target bounds, completion
//! gates) or one cat (the single active assignment) run while holding the
//! lock for that key, so two requests can never both pass the same check.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A lazily created mutex per key
#[derive(Debug)]
pub struct KeyedLocks<K> {
    slots: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Wait for exclusive access to `key`; released when the guard drops
    pub async fn lock(&self, key: K) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().await;
            // Slots nobody holds or waits on only reference themselves.
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            slots.entry(key).or_default().clone()
        };
        slot.lock_owned().await
    }

    /// Number of keys currently tracked
    pub async fn tracked_keys(&self) -> usize {
        self.slots.lock().await.len()
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
