use std::fmt;

use crate::{ByteView, ConcurrentCache, GroupError, Loader};
#[cfg(feature = "stats")]
use crate::CacheStats;

/// A named cache namespace with cache-aside loading.
///
/// [`get`](Group::get) answers from the group's [`ConcurrentCache`] when it
/// can. On a miss it calls the group's [`Loader`], wraps the returned bytes
/// in a [`ByteView`], stores it, and returns it. Loader errors are returned
/// as-is and never cached, so the next `get` for that key calls the loader
/// again.
///
/// Concurrent misses for the same key each call the loader; there is no
/// request coalescing.
///
/// # Examples
///
/// ```
/// use shardcache_core::{loader_fn, Group};
///
/// let group = Group::new("scores", 2 << 10, loader_fn(|key: &str| match key {
///     "Tom" => Ok(b"630".to_vec()),
///     _ => Err(format!("{} not exist", key).into()),
/// }));
///
/// assert_eq!(group.get("Tom").unwrap().as_string(), "630");
/// assert_eq!(group.get("Kate").unwrap_err().to_string(), "Kate not exist");
/// assert!(group.get("").is_err());
/// ```
pub struct Group {
    name: String,
    loader: Box<dyn Loader>,
    main_cache: ConcurrentCache<ByteView>,
    #[cfg(feature = "stats")]
    stats: CacheStats,
}

impl Group {
    /// Creates a group caching up to `cache_bytes` bytes (`0` = unbounded).
    ///
    /// The group is not registered anywhere; use
    /// [`GroupRegistry::new_group`](crate::GroupRegistry::new_group) for that.
    pub fn new<L>(name: impl Into<String>, cache_bytes: usize, loader: L) -> Self
    where
        L: Loader + 'static,
    {
        Self::from_parts(name.into(), cache_bytes, Box::new(loader))
    }

    /// Starts a [`GroupBuilder`].
    pub fn builder(name: impl Into<String>) -> GroupBuilder {
        GroupBuilder {
            name: name.into(),
            cache_bytes: 0,
            loader: None,
        }
    }

    fn from_parts(name: String, cache_bytes: usize, loader: Box<dyn Loader>) -> Self {
        Self {
            name,
            loader,
            main_cache: ConcurrentCache::new(cache_bytes),
            #[cfg(feature = "stats")]
            stats: CacheStats::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the byte budget of the group's cache (`0` = unbounded).
    pub fn cache_bytes(&self) -> usize {
        self.main_cache.max_bytes()
    }

    /// Returns how many entries are currently cached.
    pub fn cached_entries(&self) -> usize {
        self.main_cache.len()
    }

    /// Returns the value for `key`, loading and caching it on a miss.
    ///
    /// # Errors
    ///
    /// * [`GroupError::EmptyKey`] if `key` is empty; the loader is not called.
    /// * [`GroupError::Load`] with the loader's own error if loading fails.
    pub fn get(&self, key: &str) -> Result<ByteView, GroupError> {
        if key.is_empty() {
            return Err(GroupError::EmptyKey);
        }

        if let Some(value) = self.main_cache.get(key) {
            #[cfg(feature = "stats")]
            self.stats.record_hit();
            tracing::debug!(group = %self.name, key, "cache hit");
            return Ok(value);
        }

        #[cfg(feature = "stats")]
        self.stats.record_miss();
        self.load(key)
    }

    // Single-node scope: every load is local.
    fn load(&self, key: &str) -> Result<ByteView, GroupError> {
        self.get_locally(key)
    }

    fn get_locally(&self, key: &str) -> Result<ByteView, GroupError> {
        #[cfg(feature = "stats")]
        self.stats.record_load();
        tracing::debug!(group = %self.name, key, "loading from source");

        let bytes = self.loader.load(key).map_err(|err| {
            #[cfg(feature = "stats")]
            self.stats.record_load_error();
            tracing::warn!(group = %self.name, key, error = %err, "loader failed");
            GroupError::Load(err)
        })?;

        // The loader handed over ownership, so nothing else can mutate these bytes.
        let value = ByteView::from(bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    /// Returns the group's hit/miss/load counters.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .finish_non_exhaustive()
    }
}

/// Step-by-step construction of a [`Group`].
///
/// # Panics
///
/// [`build`](GroupBuilder::build) panics if no loader was supplied. A group
/// without a data source is a programming error.
///
/// # Examples
///
/// ```
/// use shardcache_core::{loader_fn, Group};
///
/// let group = Group::builder("pages")
///     .cache_bytes(64 << 20)
///     .loader(loader_fn(|key: &str| Ok(key.as_bytes().to_vec())))
///     .build();
///
/// assert_eq!(group.name(), "pages");
/// assert_eq!(group.cache_bytes(), 64 << 20);
/// ```
pub struct GroupBuilder {
    name: String,
    cache_bytes: usize,
    loader: Option<Box<dyn Loader>>,
}

impl GroupBuilder {
    /// Sets the byte budget (`0`, the default, means unbounded).
    pub fn cache_bytes(mut self, cache_bytes: usize) -> Self {
        self.cache_bytes = cache_bytes;
        self
    }

    pub fn loader<L>(mut self, loader: L) -> Self
    where
        L: Loader + 'static,
    {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Builds the group.
    ///
    /// # Panics
    ///
    /// Panics if no loader was set.
    pub fn build(self) -> Group {
        let name = self.name;
        let loader = self
            .loader
            .unwrap_or_else(|| panic!("group `{}` built without a loader", name));
        Group::from_parts(name, self.cache_bytes, loader)
    }
}
