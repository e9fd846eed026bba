//! linked-multiset: an insertion-ordered counting multiset on a hand-rolled
//! open-addressed hash table, alongside a handful of classic tree, heap and
//! sorting routines.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the multiset's four concerns (addressing, lazy deletion,
//!   insertion order, growth) in separate layers with small contracts.
//! - Layers:
//!   - BucketTable: slot array of `Empty | Tombstone | Occupied(EntryKey)`
//!     with linear probing. Knows nothing about elements; the caller
//!     supplies the match predicate.
//!   - Entry arena: a `SlotMap<EntryKey, Occurrence<T>>` owning each
//!     distinct element, its count, its stored hash and its order links.
//!   - OrderList: head/tail anchors of a doubly-linked list threaded through
//!     the arena by `EntryKey`.
//!   - LinkedMultiHashSet<T, S>: public API tying the three together and
//!     implementing the `MultiSet` capability trait.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` (marker in the reentrancy guard).
//! - Capacity doubles when the last free slot is taken by a new distinct
//!   element and never shrinks. At least one slot is always free between
//!   operations, so a miss always has somewhere to insert.
//! - Removal past zero is an error (`RemoveError::NotFound`), never clamped.
//!
//! Ownership
//! - The arena owns entries. Slots and list links are generational keys:
//!   plain cross-references that cannot dangle into a reused entry.
//!
//! Hashing and rehashing
//! - Each entry stores the `u64` hash computed at first insertion. Probes
//!   compare stored hashes before calling `T: Eq`; growth re-places entries
//!   by stored hash and never calls `T: Hash`.
//! - Growth walks only occupied slots. Tombstones are dropped, so a freshly
//!   grown table has none.
//!
//! Reentrancy
//! - In debug builds a guard panics if user `Eq`/`Hash` code re-enters the
//!   multiset during an operation. An element's `Drop` runs after the
//!   structure is consistent and may re-enter freely.
//!
//! Peripheral routines
//! - `tree`: binary tree type and its structural comparator.
//! - `strong_heap`: strong max-heap validator.
//! - `sorting`, `quaternary_heapsort`: in-place slice sorts.

mod bucket_table;
mod entry;
pub mod error;
mod linked_multi_hash_set;
mod linked_multi_hash_set_proptest;
pub mod multiset;
mod order_list;
pub mod quaternary_heapsort;
mod reentrancy;
pub mod sorting;
pub mod strong_heap;
pub mod tree;

// Public surface
pub use error::RemoveError;
pub use linked_multi_hash_set::{Entries, Iter, LinkedMultiHashSet, DEFAULT_CAPACITY};
pub use multiset::MultiSet;
pub use sorting::SortOrder;
pub use tree::BinaryTree;
