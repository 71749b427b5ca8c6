use std::sync::Arc;

use crate::BoxError;

/// A source of data for cache misses.
///
/// A [`Group`](crate::Group) calls `load` whenever a key is not cached. The
/// loader owns no cache state; it only has to fetch the bytes for one key.
/// It may block (disk, network); the group neither times it out nor retries.
///
/// Implement it on a stateful type, or wrap a closure with [`LoaderFn`].
///
/// # Examples
///
/// ```
/// use shardcache_core::{BoxError, Loader};
/// use std::collections::HashMap;
///
/// struct Scores(HashMap<&'static str, &'static str>);
///
/// impl Loader for Scores {
///     fn load(&self, key: &str) -> Result<Vec<u8>, BoxError> {
///         self.0
///             .get(key)
///             .map(|v| v.as_bytes().to_vec())
///             .ok_or_else(|| format!("{} not exist", key).into())
///     }
/// }
///
/// let db = Scores(HashMap::from([("Tom", "630")]));
/// assert_eq!(db.load("Tom").unwrap(), b"630");
/// assert!(db.load("Kate").is_err());
/// ```
pub trait Loader: Send + Sync {
    /// Fetches the bytes for `key`.
    fn load(&self, key: &str) -> Result<Vec<u8>, BoxError>;
}

/// Adapts a closure into a [`Loader`].
///
/// # Examples
///
/// ```
/// use shardcache_core::{loader_fn, Loader};
///
/// let loader = loader_fn(|key: &str| Ok(key.as_bytes().to_vec()));
/// assert_eq!(loader.load("key").unwrap(), b"key");
/// ```
#[derive(Clone)]
pub struct LoaderFn<F>(F);

impl<F> LoaderFn<F>
where
    F: Fn(&str) -> Result<Vec<u8>, BoxError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        LoaderFn(f)
    }
}

impl<F> Loader for LoaderFn<F>
where
    F: Fn(&str) -> Result<Vec<u8>, BoxError> + Send + Sync,
{
    fn load(&self, key: &str) -> Result<Vec<u8>, BoxError> {
        (self.0)(key)
    }
}

/// Shorthand for [`LoaderFn::new`].
pub fn loader_fn<F>(f: F) -> LoaderFn<F>
where
    F: Fn(&str) -> Result<Vec<u8>, BoxError> + Send + Sync,
{
    LoaderFn::new(f)
}

impl<L: Loader + ?Sized> Loader for Arc<L> {
    fn load(&self, key: &str) -> Result<Vec<u8>, BoxError> {
        (**self).load(key)
    }
}

impl<L: Loader + ?Sized> Loader for Box<L> {
    fn load(&self, key: &str) -> Result<Vec<u8>, BoxError> {
        (**self).load(key)
    }
}
