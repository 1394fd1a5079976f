//! Kani proof harnesses
//!
//! Bounded model-checking proofs for IndexedHeap. Kani explores every
//! combination of small symbolic inputs, so these cover the repair-direction
//! choice in `pop_at` for all orderings of a handful of items.
//!
//! To run these proofs:
//!   cargo kani --tests

#[cfg(kani)]
use indexed_heap::{HeapError, IndexedHeap};

/// Builds a heap of four distinct symbolic items
#[cfg(kani)]
fn any_heap() -> IndexedHeap<u8> {
    let items: [u8; 4] = kani::any();
    kani::assume(items[0] != items[1] && items[0] != items[2] && items[0] != items[3]);
    kani::assume(items[1] != items[2] && items[1] != items[3] && items[2] != items[3]);
    match IndexedHeap::from_items(items) {
        Ok(heap) => heap,
        Err(_) => unreachable!("items are distinct"),
    }
}

/// Proof: construction from distinct items yields a valid heap
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_construction_establishes_invariant() {
    let heap = any_heap();
    assert!(heap.len() == 4);
    assert!(heap.check_invariant().is_ok());
}

/// Proof: removing any position keeps heap order and the index in sync
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_pop_at_preserves_invariant() {
    let mut heap = any_heap();
    let position: usize = kani::any();
    kani::assume(position < 4);

    let expected = heap.as_slice()[position];
    assert!(heap.pop_at(position) == Ok(expected));
    assert!(heap.len() == 3);
    assert!(!heap.contains(&expected));
    assert!(heap.check_invariant().is_ok());
}

/// Proof: pushing a present item is rejected without changing the heap
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_duplicate_push_rejected() {
    let mut heap = any_heap();
    let position: usize = kani::any();
    kani::assume(position < 4);

    let item = heap.as_slice()[position];
    let before = heap.as_slice().to_vec();
    assert!(heap.push(item) == Err(HeapError::DuplicateItem(item)));
    assert!(heap.as_slice() == before.as_slice());
}
