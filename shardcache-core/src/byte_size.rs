/// Trait for values that report how many bytes they charge against a cache budget.
///
/// The [`LruCache`](crate::LruCache) budget is measured as
/// `key.len() + value.byte_len()` per entry, so implementations should return
/// the payload length rather than a full memory footprint.
///
/// # Examples
///
/// ```
/// use shardcache_core::ByteSize;
///
/// struct Page {
///     body: Vec<u8>,
/// }
///
/// impl ByteSize for Page {
///     fn byte_len(&self) -> usize {
///         self.body.len()
///     }
/// }
///
/// let page = Page { body: vec![0; 512] };
/// assert_eq!(page.byte_len(), 512);
/// assert_eq!(String::from("abc").byte_len(), 3);
/// ```
pub trait ByteSize {
    /// Returns the number of bytes this value charges.
    fn byte_len(&self) -> usize;
}

impl ByteSize for String {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteSize for &'static str {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Box<[u8]> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl<T: ByteSize> ByteSize for std::sync::Arc<T> {
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_string_and_str() {
        assert_eq!(String::from("hello").byte_len(), 5);
        assert_eq!("hi".byte_len(), 2);
        assert_eq!(String::new().byte_len(), 0);
    }

    #[test]
    fn test_byte_buffers_ignore_capacity() {
        let mut v = Vec::with_capacity(64);
        v.extend_from_slice(&[1u8, 2, 3]);
        assert_eq!(v.byte_len(), 3);

        let boxed: Box<[u8]> = vec![0u8; 7].into_boxed_slice();
        assert_eq!(boxed.byte_len(), 7);
    }

    #[test]
    fn test_arc_delegates() {
        let shared = Arc::new(String::from("shared"));
        assert_eq!(shared.byte_len(), 6);
    }
}
