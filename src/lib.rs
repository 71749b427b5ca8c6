//! # Shardcache
//!
//! The local building blocks of a distributed in-memory cache, in the spirit of
//! groupcache: immutable byte views, a byte-bounded LRU, a thread-safe facade over
//! it, a consistent-hash ring for picking shard owners, and cache-aside groups that
//! load misses through a user-supplied loader.
//!
//! ## Quick Start
//!
//! ```rust
//! use shardcache::{loader_fn, GroupRegistry};
//! use std::collections::HashMap;
//!
//! let db: HashMap<&str, &str> = HashMap::from([("Tom", "630"), ("Jack", "589")]);
//!
//! let registry = GroupRegistry::new();
//! registry.new_group("scores", 2 << 10, loader_fn(move |key: &str| {
//!     db.get(key)
//!         .map(|v| v.as_bytes().to_vec())
//!         .ok_or_else(|| format!("{} not exist", key).into())
//! }));
//!
//! let scores = registry.get("scores").unwrap();
//!
//! // First call loads from the source, second call is served from cache
//! assert_eq!(scores.get("Tom").unwrap().as_string(), "630");
//! assert_eq!(scores.get("Tom").unwrap().as_string(), "630");
//! ```
//!
//! ## Picking an Owner
//!
//! A distributed layer decides which node owns a key before asking that
//! node's group for it:
//!
//! ```rust
//! use shardcache::HashRing;
//!
//! let mut ring = HashRing::new(50);
//! ring.add(["10.0.0.1:8001", "10.0.0.2:8001"]);
//!
//! let owner = ring.get("Tom").expect("ring has nodes");
//! assert!(owner.starts_with("10.0.0."));
//! ```
//!
//! ## Error Handling
//!
//! [`Group::get`] returns [`GroupError::EmptyKey`] for an empty key and
//! [`GroupError::Load`] carrying the loader's own error when loading fails.
//! Failed loads are never cached:
//!
//! ```rust
//! use shardcache::{loader_fn, Group, GroupError};
//!
//! let group = Group::new("flaky", 0, loader_fn(|_: &str| Err("backend down".into())));
//!
//! assert!(matches!(group.get(""), Err(GroupError::EmptyKey)));
//! assert_eq!(group.get("k").unwrap_err().to_string(), "backend down");
//! ```

pub use shardcache_core::*;
