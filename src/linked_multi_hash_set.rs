//! LinkedMultiHashSet: counting multiset over the bucket table, iterated in first-insertion order.

use crate::bucket_table::{BucketTable, Probe};
use crate::entry::{EntryKey, Occurrence};
use crate::error::RemoveError;
use crate::multiset::MultiSet;
use crate::order_list::OrderList;
use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use hashbrown::hash_map::DefaultHashBuilder;
use slotmap::SlotMap;

/// Capacity used by `Default`, `FromIterator` and friends.
pub const DEFAULT_CAPACITY: usize = 16;

/// Multiset backed by an open-addressed, linearly probed hash table.
///
/// Iteration visits elements in the order their first occurrence was added;
/// all occurrences of an element are yielded back to back. An element whose
/// count drops to zero and is added again moves to the end. The slot array
/// doubles once every slot holds a distinct element and never shrinks.
pub struct LinkedMultiHashSet<T, S = DefaultHashBuilder> {
    hasher: S,
    table: BucketTable,
    entries: SlotMap<EntryKey, Occurrence<T>>,
    order: OrderList,
    len: usize,
    reentrancy: DebugReentrancy,
}

fn entry_matches<T, Q>(
    entries: &SlotMap<EntryKey, Occurrence<T>>,
    key: EntryKey,
    hash: u64,
    q: &Q,
) -> bool
where
    T: Borrow<Q>,
    Q: ?Sized + Eq,
{
    entries
        .get(key)
        .map(|e| e.hash == hash && e.element.borrow() == q)
        .unwrap_or(false)
}

impl<T> LinkedMultiHashSet<T>
where
    T: Eq + Hash,
{
    /// Create an empty multiset with `initial_capacity` slots.
    ///
    /// Panics if `initial_capacity == 0`.
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_hasher(initial_capacity, Default::default())
    }
}

impl<T> Default for LinkedMultiHashSet<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T, S> LinkedMultiHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(initial_capacity: usize, hasher: S) -> Self {
        assert!(initial_capacity > 0, "initial capacity must be positive");
        Self {
            hasher,
            table: BucketTable::with_capacity(initial_capacity),
            entries: SlotMap::with_capacity_and_key(initial_capacity),
            order: OrderList::new(),
            len: 0,
            reentrancy: DebugReentrancy::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn find<Q>(&self, q: &Q) -> Option<EntryKey>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        match self
            .table
            .probe(hash, |k| entry_matches(&self.entries, k, hash, q))
        {
            Probe::Hit { key, .. } => Some(key),
            Probe::Miss { .. } => None,
        }
    }

    /// Total number of occurrences.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct elements with at least one occurrence.
    pub fn distinct_count(&self) -> usize {
        self.table.occupied()
    }

    /// Current slot array length.
    pub fn internal_capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.count(q) > 0
    }

    /// Occurrences of `q`, or 0 if absent.
    pub fn count<Q>(&self, q: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).map(|k| self.entries[k].count).unwrap_or(0)
    }

    /// Add one occurrence of `element`.
    pub fn add(&mut self, element: T) {
        self.add_many(element, 1);
    }

    /// Add `count` occurrences of `element`.
    ///
    /// A new element is appended to the iteration order; an existing one
    /// keeps its position. Grows the table when the insertion fills the
    /// last free slot. Panics if `count == 0`.
    pub fn add_many(&mut self, element: T, count: usize) {
        assert!(count > 0, "number of occurrences to add must be positive");
        // Checked first so an overflow leaves the structure untouched.
        let len = self
            .len
            .checked_add(count)
            .expect("total occurrence count overflow");
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(&element);
        let probe = self
            .table
            .probe(hash, |k| entry_matches(&self.entries, k, hash, &element));
        match probe {
            Probe::Hit { key, .. } => {
                let entry = &mut self.entries[key];
                entry.count = entry
                    .count
                    .checked_add(count)
                    .expect("occurrence count overflow");
            }
            Probe::Miss { vacancy } => {
                let index =
                    vacancy.expect("bucket table keeps a free slot between insertions");
                let key = self.entries.insert(Occurrence::new(element, count, hash));
                self.order.push_back(&mut self.entries, key);
                self.table.occupy(index, key);
                if self.table.is_full() {
                    let entries = &self.entries;
                    self.table.grow(|k| entries[k].hash);
                }
            }
        }
        self.len = len;
    }

    /// Remove one occurrence of `q`, returning how many remain.
    pub fn remove<Q>(&mut self, q: &Q) -> Result<usize, RemoveError>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_many(q, 1)
    }

    /// Remove `count` occurrences of `q`, returning how many remain.
    ///
    /// Fails without modifying the multiset if `q` is absent or has fewer
    /// than `count` occurrences. When the count reaches zero the element
    /// leaves the iteration order and its slot becomes a tombstone.
    /// Panics if `count == 0`.
    pub fn remove_many<Q>(&mut self, q: &Q, count: usize) -> Result<usize, RemoveError>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        assert!(count > 0, "number of occurrences to remove must be positive");
        let g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        let (index, key) = match self
            .table
            .probe(hash, |k| entry_matches(&self.entries, k, hash, q))
        {
            Probe::Hit { index, key } => (index, key),
            Probe::Miss { .. } => return Err(RemoveError::NotFound),
        };

        let entry = &mut self.entries[key];
        if count > entry.count {
            return Err(RemoveError::NotFound);
        }
        entry.count -= count;
        let remaining = entry.count;
        self.len -= count;

        if remaining == 0 {
            self.order.unlink(&mut self.entries, key);
            self.table.vacate(index);
            let removed = self.entries.remove(key);
            // Structure is consistent again; the element's Drop may re-enter.
            drop(g);
            drop(removed);
        }
        Ok(remaining)
    }

    /// Drop every element. Capacity is kept.
    pub fn clear(&mut self) {
        let g = self.reentrancy.enter();
        self.table.clear();
        self.order.clear();
        self.len = 0;
        let entries = core::mem::take(&mut self.entries);
        drop(g);
        drop(entries);
    }
}

impl<T, S> LinkedMultiHashSet<T, S> {
    /// Every occurrence in first-insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        let left = self
            .order
            .head()
            .map(|k| self.entries[k].count)
            .unwrap_or(0);
        Iter {
            entries: &self.entries,
            current: self.order.head(),
            left,
            remaining: self.len,
        }
    }

    /// Each distinct element with its count, in first-insertion order.
    pub fn entries(&self) -> Entries<'_, T> {
        Entries {
            entries: &self.entries,
            current: self.order.head(),
            remaining: self.entries.len(),
        }
    }
}

impl<T, S> MultiSet<T> for LinkedMultiHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn add_many(&mut self, element: T, count: usize) {
        LinkedMultiHashSet::add_many(self, element, count)
    }

    fn remove_many(&mut self, element: &T, count: usize) -> Result<usize, RemoveError> {
        LinkedMultiHashSet::remove_many(self, element, count)
    }

    fn contains(&self, element: &T) -> bool {
        LinkedMultiHashSet::contains(self, element)
    }

    fn count(&self, element: &T) -> usize {
        LinkedMultiHashSet::count(self, element)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn distinct_count(&self) -> usize {
        self.table.occupied()
    }

    fn internal_capacity(&self) -> usize {
        self.table.capacity()
    }
}

/// Iterator over every occurrence, see [`LinkedMultiHashSet::iter`].
pub struct Iter<'a, T> {
    entries: &'a SlotMap<EntryKey, Occurrence<T>>,
    current: Option<EntryKey>,
    // Occurrences of `current` still to yield.
    left: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        loop {
            let entry = &entries[self.current?];
            if self.left > 0 {
                self.left -= 1;
                self.remaining -= 1;
                return Some(&entry.element);
            }
            self.current = entry.links.next;
            self.left = self.current.map(|k| entries[k].count).unwrap_or(0);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Iterator over `(element, count)` pairs, see [`LinkedMultiHashSet::entries`].
pub struct Entries<'a, T> {
    entries: &'a SlotMap<EntryKey, Occurrence<T>>,
    current: Option<EntryKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        let entry = &entries[self.current?];
        self.current = entry.links.next;
        self.remaining -= 1;
        Some((&entry.element, entry.count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Entries<'_, T> {}
impl<T> FusedIterator for Entries<'_, T> {}

impl<'a, T, S> IntoIterator for &'a LinkedMultiHashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> Extend<T> for LinkedMultiHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T, S> FromIterator<T> for LinkedMultiHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_hasher(DEFAULT_CAPACITY, S::default());
        set.extend(iter);
        set
    }
}

impl<T: fmt::Debug, S> fmt::Debug for LinkedMultiHashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

#[cfg(test)]
impl<T, S> LinkedMultiHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Check every structural invariant; panics with the first violation.
    pub(crate) fn assert_invariants(&self) {
        use crate::bucket_table::Slot;

        let total: usize = self.entries.values().map(|e| e.count).sum();
        assert_eq!(total, self.len, "len must equal the sum of counts");
        assert!(self.entries.values().all(|e| e.count > 0), "no zero-count entries");
        assert_eq!(self.table.occupied(), self.entries.len(), "occupied slots == entries");
        assert!(
            self.table.occupied() < self.table.capacity(),
            "a free slot must remain after every operation"
        );

        let occupied = self
            .table
            .slots()
            .iter()
            .filter(|s| matches!(s, Slot::Occupied(_)))
            .count();
        assert_eq!(occupied, self.table.occupied());

        for (key, e) in &self.entries {
            assert_eq!(e.hash, self.make_hash(&e.element), "stored hash is stale");
            let homes = self
                .table
                .slots()
                .iter()
                .filter(|s| **s == Slot::Occupied(key))
                .count();
            assert_eq!(homes, 1, "every entry lives in exactly one slot");
            assert!(
                matches!(self.table.probe(e.hash, |k| k == key), Probe::Hit { key: hit, .. } if hit == key),
                "entry unreachable from its hash"
            );
        }

        let mut seen = 0;
        let mut prev = None;
        let mut cur = self.order.head();
        while let Some(k) = cur {
            let e = &self.entries[k];
            assert_eq!(e.links.prev, prev, "back link mismatch");
            prev = Some(k);
            cur = e.links.next;
            seen += 1;
            assert!(seen <= self.entries.len(), "order list has a cycle");
        }
        assert_eq!(seen, self.entries.len(), "order list must visit every entry");
        assert_eq!(self.order.tail(), prev);
    }

    pub(crate) fn tombstones(&self) -> usize {
        self.table.tombstones()
    }
}
