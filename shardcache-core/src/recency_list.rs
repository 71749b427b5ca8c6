//! Doubly linked recency list backed by a slot arena.
//!
//! Nodes live in a `Vec` of slots and link to each other by [`SlotId`], so a
//! handle stays valid until its node is removed and every relinking operation
//! is O(1) without raw pointers.
//!
//! ```text
//!   slots: [ Some{A, prev: None, next: 2} | None (free) | Some{B, prev: 0, next: None} ]
//!
//!   head (MRU) ─► [0] ◄──► [2] ◄── tail (LRU)
//! ```
//!
//! Freed slots are recycled through a free list, so a long-running cache does
//! not grow its arena beyond the peak number of live entries.

/// Stable handle to a node in a [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Recency-ordered list: the front is most recently used, the back is least.
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<T> RecencyList<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// Returns the handle of the least recently used node.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Inserts `value` at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let node = Node {
            value,
            prev: None,
            next: self.head,
        };
        let id = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                SlotId(idx)
            }
            None => {
                self.slots.push(Some(node));
                SlotId(self.slots.len() - 1)
            }
        };

        match self.head {
            Some(old_head) => {
                if let Some(node) = self.node_mut(old_head) {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
        id
    }

    /// Moves an existing node to the front. Returns `false` if `id` is stale.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }

        self.detach(id);
        let old_head = self.head;
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.node_mut(h) {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        true
    }

    /// Unlinks the node and frees its slot, returning the value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.node(id)?;
        self.detach(id);
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    /// Removes and returns the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates values from front (MRU) to back (LRU).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn node(&self, id: SlotId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: SlotId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    // Splices the node out of the chain; its own links are left dangling.
    fn detach(&mut self, id: SlotId) {
        let (prev, next) = match self.node(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    #[cfg(test)]
    fn assert_linked(&self) {
        let forward: Vec<SlotId> = {
            let mut ids = Vec::new();
            let mut cur = self.head;
            while let Some(id) = cur {
                ids.push(id);
                cur = self.node(id).and_then(|n| n.next);
            }
            ids
        };
        assert_eq!(forward.len(), self.len, "forward walk disagrees with len");
        assert_eq!(forward.last().copied(), self.tail);

        let mut cur = self.tail;
        let mut backward = Vec::new();
        while let Some(id) = cur {
            backward.push(id);
            cur = self.node(id).and_then(|n| n.prev);
        }
        backward.reverse();
        assert_eq!(forward, backward, "prev links disagree with next links");
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.current?)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_push_front_orders_mru_first() {
        let mut list = RecencyList::new();
        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert_eq!(values(&list), vec!["c", "b", "a"]);
        assert_eq!(list.len(), 3);
        list.assert_linked();
    }

    #[test]
    fn test_move_to_front_from_middle_and_back() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        assert!(list.move_to_front(b));
        assert_eq!(values(&list), vec!["b", "c", "a"]);
        list.assert_linked();

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "b", "c"]);
        list.assert_linked();

        // Already at the front
        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_pop_back_returns_lru() {
        let mut list = RecencyList::new();
        list.push_front("a");
        list.push_front("b");

        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.pop_back(), Some("b"));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.assert_linked();
    }

    #[test]
    fn test_removed_slots_are_reused() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        list.push_front("b");

        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.get(a), None);
        assert!(!list.move_to_front(a));

        let c = list.push_front("c");
        assert_eq!(c.index(), a.index());
        assert_eq!(values(&list), vec!["c", "b"]);
        list.assert_linked();
    }

    #[test]
    fn test_remove_only_node_resets_ends() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.back_id(), None);
        assert_eq!(list.iter().count(), 0);

        list.push_front("b");
        assert_eq!(values(&list), vec!["b"]);
        list.assert_linked();
    }

    #[test]
    fn test_get_mut_updates_value() {
        let mut list = RecencyList::new();
        let id = list.push_front(1);
        if let Some(v) = list.get_mut(id) {
            *v = 10;
        }
        assert_eq!(list.get(id), Some(&10));
    }
}
