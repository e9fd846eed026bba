#![cfg(test)]

// Property tests for LinkedMultiHashSet kept inside the crate so they can
// call `assert_invariants` and inspect tombstones.

use crate::error::RemoveError;
use crate::linked_multi_hash_set::LinkedMultiHashSet;
use core::hash::{BuildHasher, Hasher};
use proptest::prelude::*;
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so shrinking moves toward earlier keys and shorter
// op lists.
#[derive(Clone, Debug)]
enum Op {
    Add(usize, usize),
    Remove(usize, usize),
    Contains(String),
    Count(usize),
    Iterate,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (1usize..=6, proptest::collection::vec("[a-z]{0,3}", 1..=12)).prop_flat_map(|(cap, pool)| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), 1usize..=3).prop_map(|(i, n)| Op::Add(i, n)),
            4 => (idx.clone(), 1usize..=3).prop_map(|(i, n)| Op::Remove(i, n)),
            1 => "[a-z]{0,3}".prop_map(Op::Contains),
            1 => idx.clone().prop_map(Op::Count),
            1 => Just(Op::Iterate),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (cap, pool.clone(), ops))
    })
}

/// Reference model: distinct elements with counts in first-insertion order.
#[derive(Default)]
struct Model(Vec<(Key, usize)>);

impl Model {
    fn count(&self, k: &str) -> usize {
        self.0.iter().find(|(e, _)| e.0 == k).map(|(_, c)| *c).unwrap_or(0)
    }
    fn add(&mut self, k: Key, n: usize) {
        match self.0.iter_mut().find(|(e, _)| *e == k) {
            Some((_, c)) => *c += n,
            None => self.0.push((k, n)),
        }
    }
    fn remove(&mut self, k: &Key, n: usize) -> Result<usize, RemoveError> {
        let pos = self
            .0
            .iter()
            .position(|(e, _)| e == k)
            .ok_or(RemoveError::NotFound)?;
        let c = &mut self.0[pos].1;
        if n > *c {
            return Err(RemoveError::NotFound);
        }
        *c -= n;
        let left = *c;
        if left == 0 {
            self.0.remove(pos);
        }
        Ok(left)
    }
    fn len(&self) -> usize {
        self.0.iter().map(|(_, c)| c).sum()
    }
    fn expanded(&self) -> Vec<Key> {
        self.0
            .iter()
            .flat_map(|(e, c)| std::iter::repeat(e.clone()).take(*c))
            .collect()
    }
}

// Invariants exercised across random operation sequences:
// - `len` equals the model's total and `distinct_count` its number of entries.
// - Failed removals (absent or over-count) leave the multiset unchanged.
// - Iteration matches the model's first-insertion order with runs of equal elements.
// - Capacity never decreases and only ever doubles.
// - Structural invariants (slot accounting, reachability, link symmetry) hold after each op.
fn run_scenario<S: BuildHasher>(
    mut sut: LinkedMultiHashSet<Key, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model = Model::default();
    let mut capacity = sut.internal_capacity();

    for op in ops {
        match op {
            Op::Add(i, n) => {
                let k = Key(pool[i].clone());
                sut.add_many(k.clone(), n);
                model.add(k, n);
            }
            Op::Remove(i, n) => {
                let k = Key(pool[i].clone());
                let before: Vec<Key> = sut.iter().cloned().collect();
                let expected = model.remove(&k, n);
                let got = sut.remove_many(k.0.as_str(), n);
                prop_assert_eq!(got, expected);
                if got.is_err() {
                    let after: Vec<Key> = sut.iter().cloned().collect();
                    prop_assert_eq!(before, after, "failed removal must not mutate");
                }
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains(s.as_str()), model.count(&s) > 0);
            }
            Op::Count(i) => {
                prop_assert_eq!(sut.count(pool[i].as_str()), model.count(&pool[i]));
            }
            Op::Iterate => {
                let got: Vec<Key> = sut.iter().cloned().collect();
                prop_assert_eq!(got, model.expanded());
                let pairs: Vec<(Key, usize)> = sut.entries().map(|(k, c)| (k.clone(), c)).collect();
                prop_assert_eq!(pairs, model.0.clone());
            }
            Op::Clear => {
                sut.clear();
                model = Model::default();
                prop_assert_eq!(sut.tombstones(), 0);
            }
        }

        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.distinct_count(), model.0.len());
        prop_assert_eq!(sut.is_empty(), model.0.is_empty());
        let now = sut.internal_capacity();
        prop_assert!(now == capacity || now == capacity * 2, "capacity {} -> {}", capacity, now);
        capacity = now;
    }

    prop_assert_eq!(sut.iter().cloned().collect::<Vec<_>>(), model.expanded());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((cap, pool, ops) in arb_scenario()) {
        run_scenario(LinkedMultiHashSet::new(cap), &pool, ops)?;
    }
}

// Collision variant using a constant hasher: every key shares one probe
// chain, so tombstone reuse and probe-through are exercised on every op.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((cap, pool, ops) in arb_scenario()) {
        run_scenario(LinkedMultiHashSet::with_hasher(cap, ConstBuildHasher), &pool, ops)?;
    }
}
