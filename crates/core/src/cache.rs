//! In-process TTL cache.
//!
//! Entries expire `ttl` after insertion and are purged on every access. When the cache is full,
//! inserting a new key evicts the oldest entry. Time is read through a [`Clock`] so expiry can be
//! driven deterministically in tests.
//!
//! The cache is an explicit value handed to the services that use it; there is no process-wide
//! instance.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Source of monotonic time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Reads `Instant::now()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Clone, Debug)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

pub struct TtlCache<K, V> {
    ttl: Duration,
    max_entries: usize,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache backed by the system clock.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self::with_clock(ttl, max_entries, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a clone of the fresh value for `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let mut entries = self.lock();
        Self::purge_expired(&mut entries, now, self.ttl);
        entries.get(key).map(|e| e.value.clone())
    }

    /// Stores `value` under `key`, replacing any previous value and restarting its TTL.
    pub fn insert(&self, key: K, value: V) {
        let now = self.clock.now();
        let mut entries = self.lock();
        Self::purge_expired(&mut entries, now, self.ttl);

        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.inserted_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    /// Drops the entry for `key`. Returns whether one was present.
    pub fn invalidate<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().remove(key).is_some()
    }

    /// Number of entries currently held, fresh or not yet purged.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge_expired(entries: &mut HashMap<K, Entry<V>>, now: Instant, ttl: Duration) {
        entries.retain(|_, e| now.saturating_duration_since(e.inserted_at) < ttl);
    }

    // A poisoned lock only means another thread panicked mid-update; the map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<K, Entry<V>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<K, V> std::fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .field("max_entries", &self.max_entries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Clock that only moves when told to.
    pub(crate) struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Instant::now()),
            })
        }

        pub(crate) fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    fn cache(clock: &Arc<ManualClock>, max_entries: usize) -> TtlCache<String, u32> {
        TtlCache::with_clock(Duration::from_secs(60), max_entries, clock.clone())
    }

    #[test]
    fn returns_value_within_ttl() {
        let clock = ManualClock::new();
        let cache = cache(&clock, 4);
        cache.insert("drills-list".into(), 7);

        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get("drills-list"), Some(7));
    }

    #[test]
    fn expires_value_at_ttl() {
        let clock = ManualClock::new();
        let cache = cache(&clock, 4);
        cache.insert("drills-list".into(), 7);

        clock.advance(Duration::from_secs(60));
        assert_eq!(cache.get("drills-list"), None);
        assert!(cache.is_empty(), "expired entry should be purged on access");
    }

    #[test]
    fn reinsert_restarts_ttl() {
        let clock = ManualClock::new();
        let cache = cache(&clock, 4);
        cache.insert("k".into(), 1);
        clock.advance(Duration::from_secs(40));
        cache.insert("k".into(), 2);
        clock.advance(Duration::from_secs(40));

        assert_eq!(cache.get("k"), Some(2));
    }

    #[test]
    fn evicts_oldest_when_full() {
        let clock = ManualClock::new();
        let cache = cache(&clock, 2);
        cache.insert("a".into(), 1);
        clock.advance(Duration::from_secs(1));
        cache.insert("b".into(), 2);
        clock.advance(Duration::from_secs(1));
        cache.insert("c".into(), 3);

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn replacing_existing_key_does_not_evict() {
        let clock = ManualClock::new();
        let cache = cache(&clock, 2);
        cache.insert("a".into(), 1);
        cache.insert("b".into(), 2);
        cache.insert("b".into(), 3);

        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), Some(3));
    }

    #[test]
    fn invalidate_removes_entry() {
        let clock = ManualClock::new();
        let cache = cache(&clock, 4);
        cache.insert("drills-list".into(), 1);

        assert!(cache.invalidate("drills-list"));
        assert!(!cache.invalidate("drills-list"));
        assert_eq!(cache.get("drills-list"), None);
    }

    #[test]
    fn separate_caches_do_not_share_state() {
        let clock = ManualClock::new();
        let first = cache(&clock, 4);
        let second = cache(&clock, 4);
        first.insert("drills-list".into(), 1);

        assert_eq!(second.get("drills-list"), None);
    }
}
