use crate::ByteSize;

/// A single key/value pair stored by [`LruCache`](crate::LruCache).
///
/// The entry owns its key so that eviction can report it and remove the
/// matching lookup slot without consulting anything else.
///
/// # Examples
///
/// ```
/// use shardcache_core::CacheEntry;
///
/// let entry = CacheEntry::new("key", String::from("value"));
/// assert_eq!(entry.key, "key");
/// assert_eq!(entry.charge(), 3 + 5);
/// ```
#[derive(Clone, Debug)]
pub struct CacheEntry<V> {
    pub key: String,
    pub value: V,
}

impl<V: ByteSize> CacheEntry<V> {
    /// Creates a new entry, taking a copy of `key`.
    pub fn new(key: &str, value: V) -> Self {
        Self {
            key: key.to_string(),
            value,
        }
    }

    /// Returns the bytes this entry charges against the cache budget:
    /// `key.len() + value.byte_len()`.
    #[inline]
    pub fn charge(&self) -> usize {
        self.key.len() + self.value.byte_len()
    }
}
