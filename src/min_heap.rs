//! MinHeap: array-backed binary min-heap.
//!
//! Element `i` has children `2i + 1` and `2i + 2` and parent `(i - 1) / 2`.
//! Every non-root element compares greater than or equal to its parent.

use crate::error::HeapError;
use core::fmt;

#[derive(Clone)]
pub struct MinHeap<T> {
    storage: Vec<T>,
}

impl<T> MinHeap<T> {
    pub const fn new() -> Self {
        Self {
            storage: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Backing storage in tree order (root first).
    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    /// Elements in tree order, not sorted order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.storage.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.storage
    }
}

impl<T: Ord> MinHeap<T> {
    /// Push `item` and sift it up past every strictly greater ancestor.
    pub fn add(&mut self, item: T) {
        self.storage.push(item);
        self.sift_up(self.storage.len() - 1);
    }

    /// Remove and return the smallest element.
    pub fn remove(&mut self) -> Result<T, HeapError> {
        if self.storage.is_empty() {
            return Err(HeapError::Empty);
        }
        let last = self.storage.len() - 1;
        self.storage.swap(0, last);
        let min = self.storage.pop().ok_or(HeapError::Empty)?;
        if !self.storage.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// The smallest element, without removing it.
    pub fn peek(&self) -> Result<&T, HeapError> {
        self.storage.first().ok_or(HeapError::Empty)
    }

    /// Drain the heap smallest-first.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.storage.len());
        while let Ok(item) = self.remove() {
            out.push(item);
        }
        out
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.storage[idx] < self.storage[parent] {
                self.storage.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.storage.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut min = left;
            if right < len && self.storage[right] < self.storage[left] {
                min = right;
            }
            if self.storage[idx] > self.storage[min] {
                self.storage.swap(idx, min);
                idx = min;
            } else {
                break;
            }
        }
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for MinHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.storage.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = MinHeap::new();
        heap.extend(iter);
        heap
    }
}

impl<T: Ord> Extend<T> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.storage.reserve(iter.size_hint().0);
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a MinHeap<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
pub(crate) fn is_min_heap<T: Ord>(items: &[T]) -> bool {
    (1..items.len()).all(|i| items[(i - 1) / 2] <= items[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_in_order() {
        let mut h = MinHeap::new();
        for x in [5, 3, 8, 1] {
            h.add(x);
        }
        assert_eq!(h.peek(), Ok(&1));
        assert_eq!(h.len(), 4);
        let drained: Vec<i32> = std::iter::from_fn(|| h.remove().ok()).collect();
        assert_eq!(drained, vec![1, 3, 5, 8]);
        assert!(h.is_empty());
    }

    /// Invariant: an empty heap reports `Empty` instead of indexing out of bounds.
    #[test]
    fn empty_heap_errors() {
        let mut h: MinHeap<u8> = MinHeap::new();
        assert_eq!(h.peek(), Err(HeapError::Empty));
        assert_eq!(h.remove(), Err(HeapError::Empty));
        h.add(7);
        assert_eq!(h.remove(), Ok(7));
        assert_eq!(h.remove(), Err(HeapError::Empty));
    }

    /// Invariant: sift-up stops at the first ancestor that is not strictly greater.
    #[test]
    fn sift_up_layout() {
        let mut h = MinHeap::new();
        for x in [5, 3, 8, 1] {
            h.add(x);
        }
        // 5 -> [3,5] -> [3,5,8] -> 1 climbs past 5 and 3
        assert_eq!(h.as_slice(), &[1, 3, 8, 5]);
    }

    /// Invariant: sift-down swaps with the smaller child, preferring the left one on ties.
    #[test]
    fn sift_down_prefers_left_on_tie() {
        // Ordered by the number only; the char records which child it was.
        #[derive(Debug, PartialEq, Eq)]
        struct ByKey(u8, char);
        impl PartialOrd for ByKey {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for ByKey {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                self.0.cmp(&other.0)
            }
        }
        let mut h = MinHeap::new();
        for (n, c) in [(0, 'r'), (2, 'L'), (2, 'R'), (9, 'x')] {
            h.add(ByKey(n, c));
        }
        assert_eq!(h.remove().map(|b| b.0), Ok(0));
        // 9 moved to the root, then swapped with the left 2
        assert_eq!(h.as_slice(), &[ByKey(2, 'L'), ByKey(9, 'x'), ByKey(2, 'R')]);
        assert!(is_min_heap(h.as_slice()));
    }

    #[test]
    fn duplicates_survive() {
        let h: MinHeap<i32> = [4, 1, 4, 1, 4].into_iter().collect();
        assert!(is_min_heap(h.as_slice()));
        assert_eq!(h.into_sorted_vec(), vec![1, 1, 4, 4, 4]);
    }

    #[test]
    fn extend_and_clear() {
        let mut h = MinHeap::with_capacity(8);
        h.extend(vec![10, 2, 7]);
        h.extend(Some(-1));
        assert_eq!(h.peek(), Ok(&-1));
        assert_eq!(h.iter().count(), 4);
        assert_eq!((&h).into_iter().min(), Some(&-1));
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.peek(), Err(HeapError::Empty));
    }

    #[test]
    fn debug_lists_storage() {
        let h: MinHeap<i32> = [2, 1].into_iter().collect();
        assert_eq!(format!("{:?}", h), "[1, 2]");
        assert_eq!(h.clone().into_vec(), vec![1, 2]);
    }
}
