//! Standard library compatibility layer
//!
//! Conversions and iteration that mirror `std::collections::BinaryHeap`, so an
//! [`IndexedHeap`] can stand in where a `BinaryHeap` was used.
//!
//! # Differences from BinaryHeap
//!
//! - **Ordering**: the top is whatever the heap's [`Relation`] puts first, a
//!   min-heap by default. `BinaryHeap` is always a max-heap; use
//!   [`MaxOrder`](crate::MaxOrder) for the same behaviour.
//! - **Uniqueness**: construction from a `Vec` is fallible because items must
//!   be distinct.
//! - **Sorted output**: [`IndexedHeap::into_sorted_vec`] lists items top first,
//!   in the order they would be popped.
//!
//! # Example
//!
//! ```rust
//! use indexed_heap::IndexedHeap;
//!
//! let heap: IndexedHeap<i32> = IndexedHeap::try_from(vec![5, 3, 7]).unwrap();
//! assert_eq!(heap.into_sorted_vec(), vec![3, 5, 7]);
//! ```

use crate::indexed::IndexedHeap;
use crate::traits::{HeapError, Relation};
use std::hash::Hash;

impl<T, R> IndexedHeap<T, R>
where
    T: Hash + Eq + Clone,
    R: Relation<T>,
{
    /// Consumes the heap and returns its items in heap order (not sorted)
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Consumes the heap and returns its items in pop order, top first
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(item) = self.pop() {
            sorted.push(item);
        }
        sorted
    }
}

impl<T, R> Default for IndexedHeap<T, R>
where
    T: Hash + Eq + Clone,
    R: Relation<T> + Default,
{
    fn default() -> Self {
        Self::with_relation(R::default())
    }
}

impl<T, R> TryFrom<Vec<T>> for IndexedHeap<T, R>
where
    T: Hash + Eq + Clone,
    R: Relation<T> + Default,
{
    type Error = HeapError<T>;

    /// Heapifies `items` in place under the default relation
    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        Self::from_items_with(items, R::default())
    }
}

impl<T, R> IntoIterator for IndexedHeap<T, R> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Iterates in heap order (not sorted)
    fn into_iter(self) -> Self::IntoIter {
        let (data, _) = self.into_parts();
        data.into_iter()
    }
}

impl<'a, T, R> IntoIterator for &'a IndexedHeap<T, R> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MaxOrder, MinOrder};

    #[test]
    fn test_default_is_empty() {
        let heap: IndexedHeap<u8> = IndexedHeap::default();
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
    }

    #[test]
    fn test_try_from_vec() {
        let heap: IndexedHeap<i32, MaxOrder> = IndexedHeap::try_from(vec![5, 3, 8]).unwrap();
        assert_eq!(heap.peek(), Some(&8));

        let err = IndexedHeap::<i32, MinOrder>::try_from(vec![1, 2, 1]).unwrap_err();
        assert_eq!(err, HeapError::DuplicateItem(1));
    }

    #[test]
    fn test_into_sorted_vec() {
        let heap = IndexedHeap::from_items([9, 4, 7, 1, 8]).unwrap();
        assert_eq!(heap.into_sorted_vec(), vec![1, 4, 7, 8, 9]);

        let heap = IndexedHeap::from_items_with([9, 4, 7, 1, 8], MaxOrder).unwrap();
        assert_eq!(heap.into_sorted_vec(), vec![9, 8, 7, 4, 1]);
    }

    #[test]
    fn test_iteration_matches_slice() {
        let heap = IndexedHeap::from_items(["pear", "apple", "fig"]).unwrap();
        let borrowed: Vec<&str> = (&heap).into_iter().copied().collect();
        assert_eq!(borrowed, heap.as_slice());

        let mut owned = heap.clone().into_vec();
        owned.sort_unstable();
        assert_eq!(owned, vec!["apple", "fig", "pear"]);

        let mut count = 0;
        for _ in &heap {
            count += 1;
        }
        assert_eq!(count, 3);
    }
}
