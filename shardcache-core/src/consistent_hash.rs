//! Consistent hashing with virtual nodes.
//!
//! A [`HashRing`] places `replicas` virtual nodes per real node on a 32-bit
//! ring. A key belongs to the first virtual node clockwise from the key's own
//! hash (inclusive), wrapping around past the largest position. More replicas
//! spread load more evenly and reduce how many keys move when a node joins,
//! at the cost of a larger ring.
//!
//! The ring has no internal locking. It is meant to be built once during
//! setup; wrap it in a `RwLock` if membership changes concurrently with
//! lookups.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Hash function used to place virtual nodes and keys on the ring.
pub type HashFn = Box<dyn Fn(&[u8]) -> u32 + Send + Sync>;

/// Consistent-hash ring mapping keys to real node names.
///
/// # Examples
///
/// ```
/// use shardcache_core::HashRing;
///
/// let mut ring = HashRing::new(50);
/// assert_eq!(ring.get("any"), None);
///
/// ring.add(["cache-a:8001", "cache-b:8002", "cache-c:8003"]);
/// let owner = ring.get("Tom").unwrap();
/// assert!(["cache-a:8001", "cache-b:8002", "cache-c:8003"].contains(&owner));
///
/// // Lookups are deterministic
/// assert_eq!(ring.get("Tom"), Some(owner));
/// ```
pub struct HashRing {
    hash: HashFn,
    replicas: usize,
    positions: Vec<u32>,
    owners: HashMap<u32, String>,
}

impl HashRing {
    /// Creates an empty ring hashing with CRC-32 (IEEE).
    ///
    /// # Panics
    ///
    /// Panics if `replicas` is zero.
    pub fn new(replicas: usize) -> Self {
        Self::with_hasher(replicas, crc32fast::hash)
    }

    /// Creates an empty ring with a custom hash function.
    ///
    /// # Panics
    ///
    /// Panics if `replicas` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use shardcache_core::HashRing;
    ///
    /// // Interpret keys as decimal numbers so placements are easy to predict
    /// let mut ring = HashRing::with_hasher(3, |data: &[u8]| {
    ///     std::str::from_utf8(data).unwrap().parse().unwrap()
    /// });
    ///
    /// // "6" -> 6, 16, 26 ; "4" -> 4, 14, 24 ; "2" -> 2, 12, 22
    /// ring.add(["6", "4", "2"]);
    ///
    /// assert_eq!(ring.get("2"), Some("2"));
    /// assert_eq!(ring.get("11"), Some("2"));
    /// assert_eq!(ring.get("23"), Some("4"));
    /// assert_eq!(ring.get("27"), Some("2"));
    /// ```
    pub fn with_hasher<F>(replicas: usize, hash: F) -> Self
    where
        F: Fn(&[u8]) -> u32 + Send + Sync + 'static,
    {
        assert!(replicas > 0, "hash ring needs at least one replica per node");
        Self {
            hash: Box::new(hash),
            replicas,
            positions: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Adds real nodes to the ring.
    ///
    /// Each node `n` gets virtual nodes at `hash(i.to_string() + n)` for
    /// `i` in `0..replicas`. If two virtual nodes land on the same position,
    /// the one added last owns it.
    pub fn add<I, S>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for node in nodes {
            let node = node.as_ref();
            for i in 0..self.replicas {
                let position = (self.hash)(format!("{}{}", i, node).as_bytes());
                self.positions.push(position);
                self.owners.insert(position, node.to_string());
            }
            tracing::debug!(node, replicas = self.replicas, "added node to hash ring");
        }
        self.positions.sort_unstable();
    }

    /// Returns the node owning `key`, or `None` if the ring is empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.positions.is_empty() {
            return None;
        }

        let hash = (self.hash)(key.as_bytes());
        let idx = self.positions.partition_point(|&p| p < hash) % self.positions.len();
        self.owners
            .get(&self.positions[idx])
            .map(String::as_str)
    }

    /// Returns the number of virtual nodes on the ring.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Returns the distinct real node names, sorted.
    pub fn nodes(&self) -> Vec<String> {
        self.owners
            .values()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("virtual_nodes", &self.positions.len())
            .field("nodes", &self.nodes())
            .finish()
    }
}
