//! Heap sort on top of [`MinHeap`].

use crate::min_heap::MinHeap;

/// Sort `input` ascending by adding every element to a [`MinHeap`] and
/// removing until it is empty.
///
/// ```
/// use lp_collections::heap_sort;
///
/// assert_eq!(heap_sort([5, 3, 8, 1]), vec![1, 3, 5, 8]);
/// ```
pub fn heap_sort<T, I>(input: I) -> Vec<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let heap: MinHeap<T> = input.into_iter().collect();
    tracing::trace!(len = heap.len(), "heap sort");
    heap.into_sorted_vec()
}

/// Sort the contents of `items` in place through a [`MinHeap`].
pub fn heap_sort_in_place<T: Ord>(items: &mut Vec<T>) {
    let sorted = heap_sort(items.drain(..));
    *items = sorted;
}
