use parking_lot::Mutex;

use crate::{ByteSize, ByteView, LruCache};

/// A thread-safe wrapper around [`LruCache`].
///
/// Every operation takes the same `parking_lot::Mutex` for its whole
/// duration, so all calls on one `ConcurrentCache` are linearizable. The
/// inner `LruCache` is created lazily by the first [`add`](ConcurrentCache::add);
/// until then lookups report a miss without allocating anything.
///
/// # Thread Safety
///
/// The mutex guard is scoped to each method body and released on every exit
/// path, including unwinding. `parking_lot` locks do not poison, so a panic
/// in one caller never wedges the cache for the others.
///
/// A mutex rather than a `RwLock` is required here: an LRU lookup reorders
/// the recency list, so even `get` mutates.
///
/// # Examples
///
/// ```
/// use shardcache_core::{ByteView, ConcurrentCache};
///
/// let cache: ConcurrentCache = ConcurrentCache::new(1024);
/// assert!(!cache.is_initialized());
/// assert_eq!(cache.get("tom"), None);
///
/// cache.add("tom", ByteView::from("630"));
/// assert!(cache.is_initialized());
/// assert_eq!(cache.get("tom"), Some(ByteView::from("630")));
/// ```
pub struct ConcurrentCache<V = ByteView> {
    max_bytes: usize,
    lru: Mutex<Option<LruCache<V>>>,
}

impl<V: ByteSize + Clone> ConcurrentCache<V> {
    /// Creates an uninitialized cache bounded to `max_bytes` (`0` = unbounded).
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            lru: Mutex::new(None),
        }
    }

    /// Inserts or replaces `key`, creating the inner cache on first use.
    pub fn add(&self, key: &str, value: V) {
        let mut guard = self.lru.lock();
        let lru = guard.get_or_insert_with(|| LruCache::new(self.max_bytes));
        lru.add(key, value);
    }

    /// Looks up `key`, returning a clone of the cached value.
    ///
    /// A hit promotes the entry to most recently used.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut guard = self.lru.lock();
        guard.as_mut()?.get(key).cloned()
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.lru.lock().as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bytes currently charged against the budget.
    pub fn used_bytes(&self) -> usize {
        self.lru.lock().as_ref().map_or(0, LruCache::used_bytes)
    }

    /// Returns the configured byte budget (`0` = unbounded).
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Returns `true` once the first `add` has created the inner cache.
    pub fn is_initialized(&self) -> bool {
        self.lru.lock().is_some()
    }
}

impl<V> std::fmt::Debug for ConcurrentCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentCache")
            .field("max_bytes", &self.max_bytes)
            .field("initialized", &self.lru.lock().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_get_before_add_does_not_initialize() {
        let cache: ConcurrentCache = ConcurrentCache::new(64);
        assert_eq!(cache.get("missing"), None);
        assert!(!cache.is_initialized());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.used_bytes(), 0);
    }

    #[test]
    fn test_basic_add_get() {
        let cache: ConcurrentCache = ConcurrentCache::new(0);
        cache.add("key1", ByteView::from("100"));
        assert_eq!(cache.get("key1"), Some(ByteView::from("100")));
        assert_eq!(cache.get("key2"), None);
        assert_eq!(cache.used_bytes(), 7);
    }

    #[test]
    fn test_update_existing() {
        let cache: ConcurrentCache = ConcurrentCache::new(0);
        cache.add("key", ByteView::from("1"));
        cache.add("key", ByteView::from("2"));
        assert_eq!(cache.get("key"), Some(ByteView::from("2")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_eviction_through_facade() {
        let cache: ConcurrentCache = ConcurrentCache::new(6);
        cache.add("k1", ByteView::from("1"));
        cache.add("k2", ByteView::from("2"));
        let _ = cache.get("k1");
        cache.add("k3", ByteView::from("3"));

        assert!(cache.get("k1").is_some());
        assert!(cache.get("k2").is_none());
        assert!(cache.get("k3").is_some());
    }

    #[test]
    fn test_generic_value_type() {
        let cache: ConcurrentCache<String> = ConcurrentCache::new(0);
        cache.add("k", "value".to_string());
        assert_eq!(cache.get("k"), Some("value".to_string()));
    }

    #[test]
    fn test_thread_safety() {
        let cache: Arc<ConcurrentCache> = Arc::new(ConcurrentCache::new(0));

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for j in 0..100 {
                        let key = format!("t{}-k{}", i, j);
                        cache.add(&key, ByteView::from(key.as_str()));
                        assert_eq!(cache.get(&key), Some(ByteView::from(key.as_str())));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 1000);
    }

    #[test]
    fn test_concurrent_budget_is_respected() {
        let budget = 256;
        let cache: Arc<ConcurrentCache> = Arc::new(ConcurrentCache::new(budget));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for j in 0..200 {
                        cache.add(&format!("{}:{}", i, j), ByteView::from(vec![0u8; j % 17]));
                        assert!(cache.used_bytes() <= budget);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.used_bytes() <= budget);
    }

    #[test]
    fn test_lock_survives_panicking_caller() {
        let cache: Arc<ConcurrentCache> = Arc::new(ConcurrentCache::new(0));
        cache.add("before", ByteView::from("x"));

        let c = Arc::clone(&cache);
        let result = thread::spawn(move || {
            let _ = c.get("before");
            panic!("caller failure after releasing the lock");
        })
        .join();
        assert!(result.is_err());

        cache.add("after", ByteView::from("y"));
        assert_eq!(cache.get("after"), Some(ByteView::from("y")));
    }
}
