//! Indexed binary heap
//!
//! An array-backed binary heap that also tracks where every item lives. The
//! side index turns two operations a plain binary heap can only do in O(n)
//! into O(log n) ones:
//!
//! - removing the item at an arbitrary position ([`IndexedHeap::pop_at`])
//! - removing an item by identity ([`IndexedHeap::remove`])
//!
//! The ordering is not fixed: each heap carries its own [`Relation`], so the
//! same items can form a min-heap, a max-heap or any custom order.
//!
//! # Time Complexity
//!
//! | Operation          | Complexity |
//! |--------------------|------------|
//! | `from_items`       | O(n)       |
//! | `push`             | O(log n)   |
//! | `pop` / `pop_at`   | O(log n)   |
//! | `remove`           | O(log n)   |
//! | `replace`          | O(log n)   |
//! | `pushpop`          | O(log n)   |
//! | `update`           | O(log n)   |
//! | `peek`, `contains` | O(1)       |
//! | `check_invariant`  | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use indexed_heap::IndexedHeap;
//!
//! let mut heap = IndexedHeap::from_items([5, 3, 8, 1, 9, 2]).unwrap();
//! assert_eq!(heap.peek(), Some(&1));
//!
//! // Cancel an entry before it reaches the top
//! assert_eq!(heap.remove(&8), Ok(8));
//! assert!(!heap.contains(&8));
//!
//! assert_eq!(heap.pop(), Ok(1));
//! assert_eq!(heap.pop(), Ok(2));
//! ```

use crate::traits::{HeapError, MinOrder, Relation};
use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;

/// A binary heap with O(log n) removal by position or by identity
///
/// Items must be unique under `Eq`: the heap keeps a map from each item to
/// its slot, and that map is updated in the same step as every write to the
/// backing array, so it is never observably out of date.
///
/// `R` decides which item belongs on top; see [`Relation`]. The relation is
/// fixed for the lifetime of the heap.
#[derive(Clone)]
pub struct IndexedHeap<T, R = MinOrder> {
    /// Heap-ordered items, position 0 is the top
    data: Vec<T>,
    /// Current position of every item in `data`
    positions: FxHashMap<T, usize>,
    relation: R,
}

impl<T> IndexedHeap<T>
where
    T: Ord + Hash + Clone,
{
    /// Creates an empty min-heap
    pub fn new() -> Self {
        Self::with_relation(MinOrder)
    }

    /// Creates an empty min-heap with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_relation(capacity, MinOrder)
    }

    /// Builds a min-heap from `items` in O(n)
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateItem` carrying the first repeated item.
    pub fn from_items<I>(items: I) -> Result<Self, HeapError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_items_with(items, MinOrder)
    }
}

impl<T, F> IndexedHeap<T, F>
where
    T: Hash + Eq + Clone,
    F: Fn(&T, &T) -> bool,
{
    /// Builds a heap ordered by a comparison closure
    ///
    /// `precedes(a, b)` must return true when `a` belongs at least as close
    /// to the top as `b`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use indexed_heap::IndexedHeap;
    ///
    /// let longest_first = |a: &&str, b: &&str| a.len() >= b.len();
    /// let mut heap = IndexedHeap::from_items_by(["ccc", "a", "bb"], longest_first).unwrap();
    /// assert_eq!(heap.pop(), Ok("ccc"));
    /// ```
    pub fn from_items_by<I>(items: I, precedes: F) -> Result<Self, HeapError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_items_with(items, precedes)
    }
}

impl<T, R> IndexedHeap<T, R> {
    /// Returns the number of items in the heap
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the top item without removing it
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Returns the item stored at `position`
    pub fn get(&self, position: usize) -> Option<&T> {
        self.data.get(position)
    }

    /// Returns the items in heap order (not sorted)
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterates over the items in heap order (not sorted)
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Returns the relation this heap is ordered by
    pub fn relation(&self) -> &R {
        &self.relation
    }

    pub(crate) fn into_parts(self) -> (Vec<T>, R) {
        (self.data, self.relation)
    }
}

impl<T, R> IndexedHeap<T, R>
where
    T: Hash + Eq + Clone,
    R: Relation<T>,
{
    /// Creates an empty heap ordered by `relation`
    pub fn with_relation(relation: R) -> Self {
        Self {
            data: Vec::new(),
            positions: FxHashMap::default(),
            relation,
        }
    }

    /// Creates an empty heap ordered by `relation` with room for `capacity` items
    pub fn with_capacity_and_relation(capacity: usize, relation: R) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            relation,
        }
    }

    /// Builds a heap ordered by `relation` from `items` in O(n)
    ///
    /// Items are laid out in input order, indexed, then heapified bottom-up.
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateItem` carrying the first item that repeats
    /// an earlier one. The remaining items are dropped.
    pub fn from_items_with<I>(items: I, relation: R) -> Result<Self, HeapError<T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut data: Vec<T> = items.into_iter().collect();
        let mut positions =
            FxHashMap::with_capacity_and_hasher(data.len(), Default::default());

        let mut duplicate = None;
        for (position, item) in data.iter().enumerate() {
            if positions.insert(item.clone(), position).is_some() {
                duplicate = Some(position);
                break;
            }
        }
        if let Some(position) = duplicate {
            debug!("construction rejected: item at input position {position} is a duplicate");
            return Err(HeapError::DuplicateItem(data.swap_remove(position)));
        }

        let mut heap = Self {
            data,
            positions,
            relation,
        };
        heap.heapify();
        heap.verify();
        Ok(heap)
    }

    /// Returns true if `item` is in the heap
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(item)
    }

    /// Returns the current position of `item`
    pub fn position_of<Q>(&self, item: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(item).copied()
    }

    /// Inserts `item`
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateItem` with `item` if an equal item is
    /// already present; the heap is unchanged.
    pub fn push(&mut self, item: T) -> Result<(), HeapError<T>> {
        if self.positions.contains_key(&item) {
            debug!("push rejected: item already present");
            return Err(HeapError::DuplicateItem(item));
        }

        let position = self.append_slot(item);
        self.sift_up(position);
        self.verify();
        Ok(())
    }

    /// Removes and returns the top item
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if there is nothing to pop.
    pub fn pop(&mut self) -> Result<T, HeapError<T>> {
        self.pop_at(0)
    }

    /// Removes and returns the item at `position`
    ///
    /// The last item is moved into the vacated slot. It can only be out of
    /// order in one direction: if it still follows the slot's parent it may
    /// be worse than its new children and sinks, otherwise it rises. One
    /// repair pass is always enough.
    ///
    /// # Errors
    /// Returns `HeapError::Empty` on an empty heap and
    /// `HeapError::PositionOutOfBounds` if `position >= len`.
    pub fn pop_at(&mut self, position: usize) -> Result<T, HeapError<T>> {
        let len = self.data.len();
        if len == 0 {
            debug!("pop rejected: heap is empty");
            return Err(HeapError::Empty);
        }
        if position >= len {
            debug!("pop rejected: position {position} out of bounds for length {len}");
            return Err(HeapError::PositionOutOfBounds { position, len });
        }

        let last = len - 1;
        if position != last {
            self.swap_slots(position, last);
        }
        let removed = self.take_last().ok_or(HeapError::Empty)?;

        if position < self.data.len() {
            self.repair(position);
        }
        self.verify();
        Ok(removed)
    }

    /// Removes `item` from the heap and returns the stored copy
    ///
    /// # Errors
    /// Returns `HeapError::ItemNotFound` if `item` is not present.
    pub fn remove<Q>(&mut self, item: &Q) -> Result<T, HeapError<T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&position) = self.positions.get(item) else {
            debug!("remove rejected: item not found");
            return Err(HeapError::ItemNotFound);
        };
        self.pop_at(position)
    }

    /// Pops the top item and inserts `item` in a single repair pass
    ///
    /// The returned item may be worse than `item` under the relation; use
    /// [`pushpop`](Self::pushpop) to keep the better of the two in the heap.
    ///
    /// # Errors
    /// Returns `HeapError::Empty` on an empty heap, and
    /// `HeapError::DuplicateItem` if `item` is already present below the top.
    pub fn replace(&mut self, item: T) -> Result<T, HeapError<T>> {
        if self.data.is_empty() {
            debug!("replace rejected: heap is empty");
            return Err(HeapError::Empty);
        }
        if matches!(self.positions.get(&item), Some(&position) if position != 0) {
            debug!("replace rejected: item already present");
            return Err(HeapError::DuplicateItem(item));
        }

        let top = self.set_slot(0, item);
        self.sift_down(0);
        self.verify();
        Ok(top)
    }

    /// Pushes `item` then pops the top, without growing the heap
    ///
    /// If the heap is empty or `item` precedes the current top, `item` comes
    /// straight back and nothing changes.
    ///
    /// # Errors
    /// Returns `HeapError::DuplicateItem` if `item` would be exchanged in but
    /// is already present below the top.
    pub fn pushpop(&mut self, item: T) -> Result<T, HeapError<T>> {
        let Some(top) = self.data.first() else {
            return Ok(item);
        };
        if self.relation.precedes(&item, top) {
            return Ok(item);
        }
        match self.positions.get(&item) {
            Some(0) => return Ok(item),
            Some(_) => {
                debug!("pushpop rejected: item already present");
                return Err(HeapError::DuplicateItem(item));
            }
            None => {}
        }

        let top = self.set_slot(0, item);
        self.sift_down(0);
        self.verify();
        Ok(top)
    }

    /// Restores heap order around `item` after its priority changed
    ///
    /// Useful when the relation reads state outside the items, such as a
    /// score table behind a `RefCell`: change the score, then call `update`.
    ///
    /// # Errors
    /// Returns `HeapError::ItemNotFound` if `item` is not present.
    pub fn update<Q>(&mut self, item: &Q) -> Result<(), HeapError<T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&position) = self.positions.get(item) else {
            debug!("update rejected: item not found");
            return Err(HeapError::ItemNotFound);
        };
        self.repair(position);
        self.verify();
        Ok(())
    }

    /// Re-establishes heap order over all items in O(n)
    ///
    /// For when many priorities changed at once and individual
    /// [`update`](Self::update) calls would cost more.
    pub fn rebuild(&mut self) {
        self.heapify();
        self.verify();
    }

    /// Removes all items
    pub fn clear(&mut self) {
        self.data.clear();
        self.positions.clear();
    }

    /// Verifies heap order and the identity index
    ///
    /// Scans from the last position towards the root and reports the first
    /// parent/child pair out of order, then checks that every item is
    /// recorded at its actual position. Intended for tests and debugging.
    ///
    /// # Errors
    /// `HeapError::InvariantViolation` or `HeapError::IndexMismatch`.
    pub fn check_invariant(&self) -> Result<(), HeapError<T>> {
        for position in (1..self.data.len()).rev() {
            let parent_position = parent_of(position);
            let parent = &self.data[parent_position];
            let child = &self.data[position];
            if !self.relation.precedes(parent, child) {
                return Err(HeapError::InvariantViolation {
                    parent_position,
                    position,
                    parent: parent.clone(),
                    child: child.clone(),
                });
            }
        }

        for (position, item) in self.data.iter().enumerate() {
            let recorded = self.positions.get(item).copied();
            if recorded != Some(position) {
                return Err(HeapError::IndexMismatch { position, recorded });
            }
        }
        if self.positions.len() != self.data.len() {
            // Every item is indexed correctly, so the extra entries are stale
            return Err(HeapError::IndexMismatch {
                position: self.data.len(),
                recorded: None,
            });
        }

        Ok(())
    }

    fn heapify(&mut self) {
        let len = self.data.len();
        for position in (0..len / 2).rev() {
            self.sift_down(position);
        }
        trace!("heapified {len} items");
    }

    /// Moves the item at `position` up or down, whichever its parent calls for
    fn repair(&mut self, position: usize) {
        let rises = position > 0
            && !self
                .relation
                .precedes(&self.data[parent_of(position)], &self.data[position]);

        let settled = if rises {
            self.sift_up(position)
        } else {
            self.sift_down(position)
        };
        trace!(
            "repaired position {position} by sifting {}, settled at {settled}",
            if rises { "up" } else { "down" }
        );
    }

    /// Bubbles the item at `position` towards the root, returning where it stops
    fn sift_up(&mut self, mut position: usize) -> usize {
        while position > 0 {
            let parent = parent_of(position);
            if self
                .relation
                .precedes(&self.data[parent], &self.data[position])
            {
                break;
            }
            self.swap_slots(parent, position);
            position = parent;
        }
        position
    }

    /// Bubbles the item at `position` towards the leaves, returning where it stops
    fn sift_down(&mut self, mut position: usize) -> usize {
        let len = self.data.len();
        loop {
            let left = left_child_of(position);
            if left >= len {
                break;
            }
            let right = left + 1;

            // Prefer the left child on ties
            let mut best = left;
            if right < len
                && !self
                    .relation
                    .precedes(&self.data[left], &self.data[right])
            {
                best = right;
            }

            if self
                .relation
                .precedes(&self.data[position], &self.data[best])
            {
                break;
            }
            self.swap_slots(position, best);
            position = best;
        }
        position
    }

    // Synchronized write path: every write to `data` goes through one of the
    // four functions below, each of which updates `positions` in the same step.

    fn append_slot(&mut self, item: T) -> usize {
        let position = self.data.len();
        self.positions.insert(item.clone(), position);
        self.data.push(item);
        position
    }

    fn take_last(&mut self) -> Option<T> {
        let item = self.data.pop()?;
        self.positions.remove(&item);
        Some(item)
    }

    /// Writes `item` into `position`, returning and unindexing the evicted item
    fn set_slot(&mut self, position: usize, item: T) -> T {
        let evicted = mem::replace(&mut self.data[position], item);
        self.positions.remove(&evicted);
        self.positions.insert(self.data[position].clone(), position);
        evicted
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.reindex(a);
        self.reindex(b);
    }

    #[inline]
    fn reindex(&mut self, position: usize) {
        if let Some(slot) = self.positions.get_mut(&self.data[position]) {
            *slot = position;
        }
    }

    #[inline]
    fn verify(&self) {
        #[cfg(feature = "check-invariants")]
        debug_assert!(
            self.check_invariant().is_ok(),
            "heap invariant broken after mutation"
        );
    }
}

impl<T: fmt::Debug, R> fmt::Debug for IndexedHeap<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IndexedHeap").field(&self.data).finish()
    }
}

#[inline(always)]
fn parent_of(position: usize) -> usize {
    (position - 1) >> 1
}

#[inline(always)]
fn left_child_of(position: usize) -> usize {
    (position << 1) + 1
}
