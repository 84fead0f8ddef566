use log::debug;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    inserted_at: Instant,
    value: V,
}

/// In-memory cache with a fixed time-to-live per entry.
///
/// The cache fails open: a poisoned lock is recovered and expired or missing
/// entries simply report a miss, so the worst a broken cache can do is force a
/// recompute. Concurrent misses for the same key may recompute redundantly;
/// there is deliberately no locking around the computation itself.
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A clone of the cached value, or `None` if the key is absent or its
    /// entry has outlived the TTL. Expired entries are dropped on access.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: String, value: V) {
        let mut entries = self.lock();
        entries.insert(
            key,
            CacheEntry {
                inserted_at: Instant::now(),
                value,
            },
        );
    }

    pub fn invalidate(&self, key: &str) {
        let mut entries = self.lock();
        if entries.remove(key).is_some() {
            debug!("Invalidated cache entry: {key}");
        }
    }

    /// Drop every entry whose key matches the predicate.
    pub fn invalidate_where<F: Fn(&str) -> bool>(&self, pred: F) {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !pred(key));
        let dropped = before - entries.len();
        if dropped > 0 {
            debug!("Invalidated {dropped} cache entries");
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
