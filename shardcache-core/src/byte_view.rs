use std::fmt;
use std::sync::Arc;

use crate::ByteSize;

/// An immutable view over a cached byte payload.
///
/// A `ByteView` is what a [`Group`](crate::Group) hands back to callers. The
/// payload is copied in at construction and never handed out by mutable
/// reference afterwards: [`ByteView::byte_slice`] returns a fresh copy, and
/// [`ByteView::as_string`] returns an owned string.
///
/// Cloning a view is cheap (the payload is shared behind an `Arc`), which is
/// what lets the concurrent cache return values to many readers without
/// copying the bytes under its lock.
///
/// # Examples
///
/// ```
/// use shardcache_core::ByteView;
///
/// let view = ByteView::from("630");
/// assert_eq!(view.len(), 3);
///
/// let mut copy = view.byte_slice();
/// copy[0] = b'9';
///
/// // The view itself is untouched
/// assert_eq!(view.as_string(), "630");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteView {
    bytes: Arc<[u8]>,
}

impl ByteView {
    /// Creates a view holding a private copy of `bytes`.
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }

    /// Returns the payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the payload is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns a copy of the payload.
    ///
    /// Mutating the returned vector never affects the view.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Returns the payload as a string, replacing invalid UTF-8 sequences
    /// with `U+FFFD`.
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl Default for ByteView {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl ByteSize for ByteView {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl From<Vec<u8>> for ByteView {
    /// Takes ownership of the vector; no other handle to it survives.
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        Self::from(s.into_bytes())
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("len", &self.len())
            .field("bytes", &String::from_utf8_lossy(&self.bytes))
            .finish()
    }
}
