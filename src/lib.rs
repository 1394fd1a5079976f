//! Indexed Binary Heap for Rust
//!
//! This crate provides a mutable binary-heap priority queue that can remove
//! any element in O(log n), either by its position or by the element itself,
//! under an ordering chosen per heap instance.
//!
//! # Features
//!
//! - **Removal by identity**: `remove(&item)` in O(log n) through a side index
//!   from item to position, kept in step with every write to the heap array
//! - **Removal by position**: `pop_at(i)` repairs in a single pass, sifting
//!   either up or down depending on the moved item's new parent
//! - **Pluggable ordering**: min, max, or any `Fn(&T, &T) -> bool`
//! - **In-place re-prioritization**: `update(&item)` and `rebuild()` for
//!   relations that read external state
//! - **Invariant checking**: `check_invariant()` verifies heap order and the
//!   index; the `check-invariants` feature runs it after every mutation in
//!   debug builds (`cargo test --features check-invariants` runs the whole
//!   suite that way)
//!
//! Items must be unique (`Hash + Eq`); they serve as their own keys.
//!
//! # Example
//!
//! ```rust
//! use indexed_heap::{HeapError, IndexedHeap, MaxOrder};
//!
//! let mut heap = IndexedHeap::from_items_with([5, 3, 8, 1, 9, 2], MaxOrder).unwrap();
//! assert_eq!(heap.peek(), Some(&9));
//!
//! heap.remove(&5).unwrap();
//! assert_eq!(heap.push(8), Err(HeapError::DuplicateItem(8)));
//!
//! assert_eq!(heap.into_sorted_vec(), vec![9, 8, 3, 2, 1]);
//! ```
//!
//! The heap is single-owner and not synchronized; wrap it in a lock to share
//! it between threads.

pub mod indexed;
pub mod stdlib_compat;
pub mod traits;

// Re-export the main types for convenience
pub use indexed::IndexedHeap;
pub use traits::{HeapError, MaxOrder, MinOrder, Relation};
