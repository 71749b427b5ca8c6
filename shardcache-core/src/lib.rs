//! # Shardcache Core
//!
//! Building blocks for the single-process half of a distributed in-memory cache.
//!
//! ## Features
//!
//! - **Immutable values**: [`ByteView`] hands out copies, never the stored bytes
//! - **Byte-bounded LRU**: [`LruCache`] charges `key.len() + value.byte_len()` per entry
//!   and evicts least recently used entries until it fits, with an optional eviction callback
//! - **Thread-safe facade**: [`ConcurrentCache`] guards a lazily created `LruCache` with one mutex
//! - **Consistent hashing**: [`HashRing`] maps keys to owner nodes through virtual nodes
//! - **Cache-aside groups**: [`Group`] loads misses through a user [`Loader`] and caches the result
//! - **Explicit registry**: [`GroupRegistry`] finds groups by name without global state
//! - **Statistics**: per-group hit/miss/load counters (with the `stats` feature)
//!
//! ## Module Organization
//!
//! - [`byte_view`] - Immutable byte payload
//! - [`lru`] - Byte-bounded LRU eviction cache
//! - [`recency_list`] - Arena-backed doubly linked list used for recency order
//! - [`concurrent_cache`] - Mutex-guarded facade over the LRU
//! - [`consistent_hash`] - Virtual-node hash ring
//! - [`group`] - Cache-aside namespaces and their builder
//! - [`registry`] - Name to group directory
//!
//! ## Logging
//!
//! Hits, loads, loader failures and evictions are reported as [`tracing`] events.
//! The library never installs a subscriber.
mod byte_size;
mod cache_entry;
mod error;
mod loader;

pub mod byte_view;
pub mod concurrent_cache;
pub mod consistent_hash;
pub mod group;
pub mod lru;
pub mod recency_list;
pub mod registry;

#[cfg(feature = "stats")]
mod stats;

pub use byte_size::ByteSize;
pub use byte_view::ByteView;
pub use cache_entry::CacheEntry;
pub use concurrent_cache::ConcurrentCache;
pub use consistent_hash::{HashFn, HashRing};
pub use error::{BoxError, GroupError};
pub use group::{Group, GroupBuilder};
pub use loader::{loader_fn, Loader, LoaderFn};
pub use lru::{EvictionCallback, LruCache};
pub use registry::GroupRegistry;

#[cfg(feature = "stats")]
pub use stats::CacheStats;
