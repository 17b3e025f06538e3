//! Indexed min-priority queue.
//!
//! A binary min-heap of `(key, priority)` entries with a key → slot index,
//! so that arbitrary entries can be removed or re-prioritised in O(log n)
//! instead of the O(n) scan a plain [`std::collections::BinaryHeap`] would
//! need.
//!
//! ```text
//!             slot:  0      1      2      3
//! heap:           [(ab,3) (bc,5) (ac,4) (cd,9)]
//! index:          ab→0  bc→1  ac→2  cd→3
//! ```
//!
//! The heap vector holds the slot → key direction; `index` holds
//! key → slot. Every swap keeps the two in sync.
//!
//! # Storage policy
//!
//! Capacity doubles when the heap is full and halves once occupancy drops to
//! a quarter of capacity. Shrinking stops at [`MIN_CAPACITY`].
//!
//! # Example
//!
//! ```rust
//! use slidegraph::IndexedMinPQ;
//!
//! let mut pq = IndexedMinPQ::new();
//! pq.add("a", 5);
//! pq.add("b", 2);
//! pq.add("c", 7);
//!
//! pq.update(&"c", 1);
//! assert_eq!(pq.peek_min(), Some((&"c", &1)));
//!
//! assert!(pq.remove(&"b"));
//! assert_eq!(pq.pop_min(), Some(("c", 1)));
//! assert_eq!(pq.len(), 1);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

/// Smallest logical capacity; the heap never shrinks below this.
pub const MIN_CAPACITY: usize = 4;

#[derive(Debug, Clone)]
struct Entry<K, P> {
    key: K,
    priority: P,
}

/// Binary min-heap keyed by `K`, ordered by `P`.
///
/// All operations report misuse (duplicate key, unknown key) through their
/// return value; none of them panic.
#[derive(Debug, Clone)]
pub struct IndexedMinPQ<K, P> {
    heap: Vec<Entry<K, P>>,
    index: HashMap<K, usize>,
    capacity: usize,
}

impl<K, P> Default for IndexedMinPQ<K, P>
where
    K: Hash + Eq + Clone,
    P: PartialOrd + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> IndexedMinPQ<K, P>
where
    K: Hash + Eq + Clone,
    P: PartialOrd + Clone,
{
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::with_capacity(MIN_CAPACITY),
            index: HashMap::with_capacity(MIN_CAPACITY),
            capacity: MIN_CAPACITY,
        }
    }

    /// Insert `key` with `priority`.
    ///
    /// Returns `false` (and leaves the queue untouched) if `key` is already
    /// present.
    pub fn add(&mut self, key: K, priority: P) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        if self.heap.len() == self.capacity {
            self.capacity *= 2;
            self.heap.reserve_exact(self.capacity - self.heap.len());
        }

        let slot = self.heap.len();
        self.index.insert(key.clone(), slot);
        self.heap.push(Entry { key, priority });
        self.sift_up(slot);
        true
    }

    /// Remove `key`. Returns `false` if it was not present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.get(key).copied() {
            Some(slot) => self.remove_at(slot).is_some(),
            None => false,
        }
    }

    /// Change the priority of `key`. Returns `false` if it was not present.
    ///
    /// The new priority may be higher or lower than the old one.
    pub fn update(&mut self, key: &K, priority: P) -> bool {
        let Some(slot) = self.index.get(key).copied() else {
            return false;
        };
        self.heap[slot].priority = priority;
        self.restore(slot);
        true
    }

    /// Priority currently stored for `key`.
    pub fn value(&self, key: &K) -> Option<&P> {
        self.index.get(key).map(|&slot| &self.heap[slot].priority)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Entry with the smallest priority, without removing it.
    pub fn peek_min(&self) -> Option<(&K, &P)> {
        self.heap.first().map(|e| (&e.key, &e.priority))
    }

    /// Remove and return the entry with the smallest priority.
    pub fn pop_min(&mut self) -> Option<(K, P)> {
        self.remove_at(0).map(|e| (e.key, e.priority))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Logical slot capacity under the grow/shrink policy.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over entries in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&K, &P)> {
        self.heap.iter().map(|e| (&e.key, &e.priority))
    }

    fn remove_at(&mut self, slot: usize) -> Option<Entry<K, P>> {
        if slot >= self.heap.len() {
            return None;
        }
        let last = self.heap.len() - 1;
        if slot != last {
            self.swap(slot, last);
        }

        let entry = self.heap.pop()?;
        self.index.remove(&entry.key);

        if slot < self.heap.len() {
            self.restore(slot);
        }
        self.maybe_shrink();
        Some(entry)
    }

    fn maybe_shrink(&mut self) {
        if self.capacity > MIN_CAPACITY && self.heap.len() <= self.capacity / 4 {
            self.capacity /= 2;
            self.heap.shrink_to(self.capacity);
        }
    }

    /// Re-establish heap order for an entry whose priority may have moved in
    /// either direction.
    fn restore(&mut self, slot: usize) {
        if slot > 0 && self.less(slot, parent(slot)) {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let up = parent(slot);
            if !self.less(slot, up) {
                break;
            }
            self.swap(slot, up);
            slot = up;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, slot) {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].priority < self.heap[b].priority
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        if let Some(pos) = self.index.get_mut(&self.heap[a].key) {
            *pos = a;
        }
        if let Some(pos) = self.index.get_mut(&self.heap[b].key) {
            *pos = b;
        }
    }
}

fn parent(slot: usize) -> usize {
    (slot - 1) / 2
}
