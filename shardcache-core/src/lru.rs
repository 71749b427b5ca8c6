use std::collections::HashMap;
use std::fmt;

use crate::recency_list::{RecencyList, SlotId};
use crate::{ByteSize, CacheEntry};

/// Callback invoked with the key and value of every entry evicted by
/// [`LruCache::remove_oldest`].
pub type EvictionCallback<V> = Box<dyn FnMut(&str, &V) + Send>;

/// A byte-bounded least-recently-used cache.
///
/// Each entry charges `key.len() + value.byte_len()` bytes against
/// `max_bytes`. After every [`add`](LruCache::add) the least recently used
/// entries are evicted until the running total fits again. A `max_bytes` of
/// zero disables the bound entirely.
///
/// Recency is tracked by an arena-backed doubly linked list, with a
/// `HashMap<String, SlotId>` pointing into it, so lookups, promotions and
/// evictions are all O(1).
///
/// # Thread Safety
///
/// `LruCache` is not synchronized. Share it between threads through
/// [`ConcurrentCache`](crate::ConcurrentCache), which wraps it in a mutex.
///
/// # Examples
///
/// ```
/// use shardcache_core::LruCache;
///
/// // Room for exactly two entries: "k1" + "a" charges 3 bytes
/// let mut cache = LruCache::new(6);
/// cache.add("k1", String::from("a"));
/// cache.add("k2", String::from("b"));
///
/// // Touch k1 so that k2 becomes the eviction candidate
/// assert!(cache.get("k1").is_some());
/// cache.add("k3", String::from("c"));
///
/// assert!(cache.contains("k1"));
/// assert!(!cache.contains("k2"));
/// assert!(cache.contains("k3"));
/// ```
pub struct LruCache<V> {
    max_bytes: usize,
    used_bytes: usize,
    order: RecencyList<CacheEntry<V>>,
    index: HashMap<String, SlotId>,
    on_evicted: Option<EvictionCallback<V>>,
}

impl<V: ByteSize> LruCache<V> {
    /// Creates an empty cache bounded to `max_bytes` (`0` = unbounded).
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            order: RecencyList::new(),
            index: HashMap::new(),
            on_evicted: None,
        }
    }

    /// Registers a callback that runs once per evicted entry.
    ///
    /// The callback runs after the entry has been fully removed and the byte
    /// total adjusted. Explicit [`remove`](LruCache::remove) and
    /// [`clear`](LruCache::clear) do not count as evictions.
    ///
    /// # Examples
    ///
    /// ```
    /// use shardcache_core::LruCache;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let evicted = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&evicted);
    ///
    /// let mut cache = LruCache::new(4).with_on_evicted(move |key: &str, _value: &String| {
    ///     sink.lock().unwrap().push(key.to_string());
    /// });
    /// cache.add("a", String::from("1"));
    /// cache.add("b", String::from("2"));
    /// cache.add("c", String::from("3"));
    ///
    /// assert_eq!(*evicted.lock().unwrap(), vec!["a".to_string()]);
    /// ```
    pub fn with_on_evicted<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, &V) + Send + 'static,
    {
        self.on_evicted = Some(Box::new(callback));
        self
    }

    /// Looks up `key`, marking it most recently used on a hit.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Looks up `key` without touching its recency.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let id = self.index.get(key)?;
        self.order.get(*id).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` is cached. Does not touch recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts or replaces `key`, then evicts until the byte budget is met.
    ///
    /// Replacing keeps the entry's slot, adjusts the byte total by the size
    /// delta and marks it most recently used. A single entry larger than the
    /// whole budget is evicted along with everything else.
    pub fn add(&mut self, key: &str, value: V) {
        match self.index.get(key) {
            Some(&id) => {
                self.order.move_to_front(id);
                if let Some(entry) = self.order.get_mut(id) {
                    let old_len = entry.value.byte_len();
                    self.used_bytes = self.used_bytes - old_len + value.byte_len();
                    entry.value = value;
                }
            }
            None => {
                let entry = CacheEntry::new(key, value);
                self.used_bytes += entry.charge();
                let id = self.order.push_front(entry);
                self.index.insert(key.to_string(), id);
            }
        }

        while self.max_bytes != 0 && self.used_bytes > self.max_bytes {
            if self.remove_oldest().is_none() {
                break;
            }
        }
    }

    /// Evicts the least recently used entry and returns it.
    ///
    /// The lookup map, the recency list and the byte total are all updated
    /// before the eviction callback (if any) is invoked.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        let charge = entry.charge();
        self.used_bytes -= charge;

        tracing::trace!(key = %entry.key, bytes = charge, "evicted least recently used entry");

        if let Some(callback) = self.on_evicted.as_mut() {
            callback(&entry.key, &entry.value);
        }
        Some((entry.key, entry.value))
    }

    /// Removes `key` if present and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.order.remove(id)?;
        self.used_bytes -= entry.charge();
        Some(entry.value)
    }

    /// Drops every entry without invoking the eviction callback.
    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
        self.used_bytes = 0;
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the running total of `key.len() + value.byte_len()`.
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// Returns the configured byte budget (`0` = unbounded).
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Returns the cached keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.order.len())
            .field("on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}
