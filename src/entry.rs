//! Occurrence entries: per-element storage shared by the bucket table and the order list.

use slotmap::new_key_type;

new_key_type! {
    /// Generational key of an entry in the multiset's arena. Slots and order
    /// links hold these; they never own the entry.
    pub(crate) struct EntryKey;
}

/// Neighbours in first-insertion order.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Links {
    pub(crate) prev: Option<EntryKey>,
    pub(crate) next: Option<EntryKey>,
}

#[derive(Debug)]
pub(crate) struct Occurrence<T> {
    pub(crate) element: T,
    pub(crate) count: usize,
    // Hash computed once at insertion; rehashing and probing reuse it.
    pub(crate) hash: u64,
    pub(crate) links: Links,
}

impl<T> Occurrence<T> {
    pub(crate) fn new(element: T, count: usize, hash: u64) -> Self {
        Self {
            element,
            count,
            hash,
            links: Links::default(),
        }
    }
}
