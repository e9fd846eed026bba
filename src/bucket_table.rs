//! BucketTable: open-addressed slot array with linear probing and tombstones.
//!
//! The table stores only `EntryKey`s; the entries themselves live in the
//! multiset's arena. Matching is delegated to the caller through a closure so
//! this layer never touches `T`.

use crate::entry::EntryKey;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Slot {
    Empty,
    /// Previously occupied. Probes continue past it; insertion may reuse it.
    Tombstone,
    Occupied(EntryKey),
}

/// Outcome of a probe sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    Hit { index: usize, key: EntryKey },
    /// No match. `vacancy` is where a new entry for this hash belongs: the
    /// first tombstone seen, else the empty slot that ended the scan. `None`
    /// only when every slot is occupied.
    Miss { vacancy: Option<usize> },
}

/// Reduce a hash to a slot index in `[0, capacity)`.
///
/// Hashes are unsigned, so there is no negative input to fold; a hash whose
/// bit pattern is `i64::MIN` reduces like any other value.
#[inline]
pub(crate) fn normalize(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}

#[derive(Debug)]
pub(crate) struct BucketTable {
    slots: Vec<Slot>,
    occupied: usize,
}

impl BucketTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "bucket table capacity must be positive");
        Self {
            slots: vec![Slot::Empty; capacity],
            occupied: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    /// Walk the probe sequence for `hash`. `is_match` is only called on
    /// occupied slots.
    pub(crate) fn probe<F>(&self, hash: u64, mut is_match: F) -> Probe
    where
        F: FnMut(EntryKey) -> bool,
    {
        let capacity = self.slots.len();
        let start = normalize(hash, capacity);
        let mut tombstone = None;
        for step in 0..capacity {
            let index = (start + step) % capacity;
            match self.slots[index] {
                Slot::Empty => {
                    return Probe::Miss {
                        vacancy: Some(tombstone.unwrap_or(index)),
                    }
                }
                Slot::Tombstone => {
                    tombstone.get_or_insert(index);
                }
                Slot::Occupied(key) => {
                    if is_match(key) {
                        return Probe::Hit { index, key };
                    }
                }
            }
        }
        Probe::Miss { vacancy: tombstone }
    }

    pub(crate) fn occupy(&mut self, index: usize, key: EntryKey) {
        debug_assert!(!matches!(self.slots[index], Slot::Occupied(_)));
        self.slots[index] = Slot::Occupied(key);
        self.occupied += 1;
    }

    pub(crate) fn vacate(&mut self, index: usize) {
        debug_assert!(matches!(self.slots[index], Slot::Occupied(_)));
        self.slots[index] = Slot::Tombstone;
        self.occupied -= 1;
    }

    /// Double the capacity and re-place every occupied slot by its stored
    /// hash. Tombstones are not carried over.
    pub(crate) fn grow<H>(&mut self, hash_of: H)
    where
        H: Fn(EntryKey) -> u64,
    {
        let capacity = self
            .slots
            .len()
            .checked_mul(2)
            .expect("bucket table capacity overflow");
        let old = core::mem::replace(&mut self.slots, vec![Slot::Empty; capacity]);
        for slot in old {
            if let Slot::Occupied(key) = slot {
                let mut index = normalize(hash_of(key), capacity);
                while self.slots[index] != Slot::Empty {
                    index = (index + 1) % capacity;
                }
                self.slots[index] = Slot::Occupied(key);
            }
        }
    }

    /// Reset every slot to empty, keeping the capacity.
    pub(crate) fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.occupied = 0;
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[cfg(test)]
    pub(crate) fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Tombstone))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<EntryKey> {
        let mut arena: SlotMap<EntryKey, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    /// Places `key` wherever a miss says it belongs.
    fn place(t: &mut BucketTable, hash: u64, key: EntryKey) -> usize {
        match t.probe(hash, |k| k == key) {
            Probe::Miss {
                vacancy: Some(index),
            } => {
                t.occupy(index, key);
                index
            }
            other => panic!("unexpected probe: {:?}", other),
        }
    }

    #[test]
    fn normalize_stays_in_range_for_extreme_hashes() {
        for cap in [1usize, 3, 4, 7, 8, 1000] {
            for h in [0u64, 1, u64::MAX, i64::MIN as u64, i64::MAX as u64] {
                assert!(normalize(h, cap) < cap);
            }
        }
        // The bit pattern of the minimum signed value is an ordinary even number.
        assert_eq!(normalize(i64::MIN as u64, 4), 0);
        assert_eq!(normalize(u64::MAX, 4), 3);
    }

    #[test]
    fn collisions_probe_linearly_and_wrap() {
        let ks = keys(3);
        let mut t = BucketTable::with_capacity(4);
        assert_eq!(place(&mut t, 3, ks[0]), 3);
        assert_eq!(place(&mut t, 3, ks[1]), 0);
        assert_eq!(place(&mut t, 3, ks[2]), 1);
        assert_eq!(
            t.probe(3, |k| k == ks[2]),
            Probe::Hit {
                index: 1,
                key: ks[2]
            }
        );
        assert_eq!(t.occupied(), 3);
    }

    #[test]
    fn tombstone_is_probed_through_and_reused_first() {
        let ks = keys(4);
        let mut t = BucketTable::with_capacity(8);
        for &k in &ks[..3] {
            place(&mut t, 0, k);
        }
        t.vacate(1);
        assert_eq!(t.tombstones(), 1);
        assert_eq!(t.occupied(), 2);

        // A key beyond the tombstone is still reachable.
        assert_eq!(
            t.probe(0, |k| k == ks[2]),
            Probe::Hit {
                index: 2,
                key: ks[2]
            }
        );
        // A miss reports the tombstone rather than the later empty slot.
        assert_eq!(
            t.probe(0, |k| k == ks[3]),
            Probe::Miss { vacancy: Some(1) }
        );
        assert_eq!(place(&mut t, 0, ks[3]), 1);
        assert_eq!(t.tombstones(), 0);
    }

    #[test]
    fn saturated_table_without_empty_slots_reports_tombstone() {
        let ks = keys(2);
        let mut t = BucketTable::with_capacity(2);
        place(&mut t, 0, ks[0]);
        place(&mut t, 0, ks[1]);
        assert!(t.is_full());
        assert_eq!(t.probe(0, |_| false), Probe::Miss { vacancy: None });
        t.vacate(0);
        assert_eq!(t.probe(1, |_| false), Probe::Miss { vacancy: Some(0) });
    }

    #[test]
    fn grow_doubles_and_drops_tombstones() {
        let ks = keys(3);
        let hashes = [5u64, 5, 6];
        let mut t = BucketTable::with_capacity(4);
        for (k, h) in ks.iter().zip(hashes) {
            place(&mut t, h, *k);
        }
        t.vacate(normalize(5, 4));
        assert_eq!(t.tombstones(), 1);

        let hash_of = |key: EntryKey| hashes[ks.iter().position(|&k| k == key).unwrap()];
        t.grow(hash_of);
        assert_eq!(t.capacity(), 8);
        assert_eq!(t.tombstones(), 0);
        assert_eq!(t.occupied(), 2);
        for &k in &ks[1..] {
            assert!(matches!(t.probe(hash_of(k), |x| x == k), Probe::Hit { .. }));
        }
        let live = t
            .slots()
            .iter()
            .filter(|s| matches!(s, Slot::Occupied(_)))
            .count();
        assert_eq!(live, 2);
    }

    #[test]
    fn clear_keeps_capacity() {
        let ks = keys(2);
        let mut t = BucketTable::with_capacity(2);
        place(&mut t, 0, ks[0]);
        place(&mut t, 1, ks[1]);
        t.grow(|_| 0);
        t.clear();
        assert_eq!(t.capacity(), 4);
        assert_eq!(t.occupied(), 0);
        assert!(t.slots().iter().all(|s| *s == Slot::Empty));
    }
}
