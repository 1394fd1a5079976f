//! Ordering relations and the error type shared by heap operations
//!
//! An [`IndexedHeap`](crate::indexed::IndexedHeap) is parametric over a
//! [`Relation`]: a total preorder deciding which of two items belongs closer
//! to the top. The same set of items can be ordered differently by different
//! heaps (min, max, by a derived key, by an external score table).
//!
//! - [`MinOrder`]: `a <= b`, the default; the smallest item is on top
//! - [`MaxOrder`]: `a >= b`; the largest item is on top
//! - any closure `Fn(&T, &T) -> bool`
//!
//! # Example
//!
//! ```rust
//! use indexed_heap::{MaxOrder, MinOrder, Relation};
//!
//! assert!(MinOrder.precedes(&1, &2));
//! assert!(MaxOrder.precedes(&2, &1));
//!
//! let by_len = |a: &&str, b: &&str| a.len() <= b.len();
//! assert!(by_len.precedes(&"ab", &"abc"));
//! ```

use thiserror::Error;

/// A total preorder over heap items
///
/// `precedes(a, b)` returns true when `a` should sit at least as close to the
/// top of the heap as `b`. The relation must be reflexive-compatible with the
/// items it orders and transitive; it does not need to distinguish equal
/// priorities.
pub trait Relation<T: ?Sized> {
    /// Returns true if `a` is at least as good as `b`
    fn precedes(&self, a: &T, b: &T) -> bool;
}

/// Natural ascending order: the smallest item is the top
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MinOrder;

impl<T: Ord + ?Sized> Relation<T> for MinOrder {
    #[inline]
    fn precedes(&self, a: &T, b: &T) -> bool {
        a <= b
    }
}

/// Natural descending order: the largest item is the top
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaxOrder;

impl<T: Ord + ?Sized> Relation<T> for MaxOrder {
    #[inline]
    fn precedes(&self, a: &T, b: &T) -> bool {
        a >= b
    }
}

impl<T: ?Sized, F> Relation<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn precedes(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Error type for heap operations
///
/// Every operation that returns an error leaves the heap exactly as it was.
/// Variants that reject an item hand it back so the caller keeps ownership.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError<T> {
    /// An item equal to the given one is already in the heap
    #[error("item {0:?} is already in the heap")]
    DuplicateItem(T),
    /// The operation needs a top element but the heap has none
    #[error("heap is empty")]
    Empty,
    /// The item to remove or update is not in the heap
    #[error("item not found in heap")]
    ItemNotFound,
    /// A position past the end of the heap was requested
    #[error("position {position} is out of bounds for heap of length {len}")]
    PositionOutOfBounds { position: usize, len: usize },
    /// A child precedes its parent under the heap's relation
    #[error(
        "heap invariant violated: heap[{parent_position}] = {parent:?} does not precede heap[{position}] = {child:?}"
    )]
    InvariantViolation {
        parent_position: usize,
        position: usize,
        parent: T,
        child: T,
    },
    /// The identity index disagrees with the sequence
    #[error("identity index out of sync at position {position} (index records {recorded:?})")]
    IndexMismatch {
        position: usize,
        recorded: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_order() {
        assert!(MinOrder.precedes(&1, &2));
        assert!(MinOrder.precedes(&2, &2));
        assert!(!MinOrder.precedes(&3, &2));
    }

    #[test]
    fn test_max_order() {
        assert!(MaxOrder.precedes(&2, &1));
        assert!(MaxOrder.precedes(&2, &2));
        assert!(!MaxOrder.precedes(&1, &2));
    }

    #[test]
    fn test_closure_relation() {
        let by_abs = |a: &i32, b: &i32| a.abs() <= b.abs();
        assert!(by_abs.precedes(&-1, &2));
        assert!(!by_abs.precedes(&-3, &2));
    }

    #[test]
    fn test_unsized_items() {
        assert!(MinOrder.precedes("apple", "banana"));
        assert!(MaxOrder.precedes(&[3, 1][..], &[2, 9][..]));
    }

    #[test]
    fn test_error_messages() {
        let err: HeapError<i32> = HeapError::DuplicateItem(7);
        assert_eq!(err.to_string(), "item 7 is already in the heap");

        let err: HeapError<i32> = HeapError::InvariantViolation {
            parent_position: 0,
            position: 2,
            parent: 5,
            child: 1,
        };
        assert_eq!(
            err.to_string(),
            "heap invariant violated: heap[0] = 5 does not precede heap[2] = 1"
        );

        let err: HeapError<i32> = HeapError::PositionOutOfBounds { position: 4, len: 3 };
        assert_eq!(
            err.to_string(),
            "position 4 is out of bounds for heap of length 3"
        );
    }
}
