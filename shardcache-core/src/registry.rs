use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{Group, Loader};

/// Directory of [`Group`]s indexed by name.
///
/// The registry is an ordinary value: create one at startup and pass it (or
/// an `Arc` of it) to whatever needs to create or find groups. Independent
/// registries never see each other's groups, which keeps tests isolated.
///
/// # Thread Safety
///
/// Groups are stored behind a `parking_lot::RwLock`: registration takes the
/// write lock, lookups share the read lock. Lookups hand out `Arc<Group>`
/// clones, so no lock is held while a caller uses a group.
///
/// # Examples
///
/// ```
/// use shardcache_core::{loader_fn, GroupRegistry};
///
/// let registry = GroupRegistry::new();
/// registry.new_group("scores", 2 << 10, loader_fn(|key: &str| Ok(key.as_bytes().to_vec())));
///
/// let group = registry.get("scores").expect("registered above");
/// assert_eq!(group.get("Tom").unwrap().as_string(), "Tom");
///
/// assert!(registry.get("unknown").is_none());
/// ```
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group and registers it under `name`.
    ///
    /// Registering a name that already exists replaces the previous group;
    /// handles to the old group remain usable but it is no longer listed.
    pub fn new_group<L>(&self, name: &str, cache_bytes: usize, loader: L) -> Arc<Group>
    where
        L: Loader + 'static,
    {
        self.register(Group::new(name, cache_bytes, loader))
    }

    /// Registers an already-built group under its own name.
    pub fn register(&self, group: Group) -> Arc<Group> {
        let group = Arc::new(group);
        let mut groups = self.groups.write();
        if groups
            .insert(group.name().to_string(), Arc::clone(&group))
            .is_some()
        {
            tracing::warn!(group = %group.name(), "replaced existing group");
        } else {
            tracing::debug!(
                group = %group.name(),
                cache_bytes = group.cache_bytes(),
                "registered group"
            );
        }
        group
    }

    /// Returns the group registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}
