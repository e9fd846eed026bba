// LinkedMultiHashSet property tests through the public API.
//
// Property 1: count conservation and distinctness.
//  - Model: std HashMap of element -> net count.
//  - Invariant: len() == sum of model counts; distinct_count() == number
//    of keys with a positive count; count(e) matches the model for every e.
//  - Operations: add_many / remove_many with small counts over a small key
//    space so removals often hit, miss, or over-count.
//
// Property 2: capacity only doubles.
//  - Invariant: after every op the new capacity equals the old one or twice it,
//    and distinct_count() stays strictly below it.
//
// Property 3: a failed removal changes nothing observable.
use linked_multiset::{LinkedMultiHashSet, RemoveError};
use proptest::prelude::*;
use std::collections::HashMap;

fn ops() -> impl Strategy<Value = Vec<(bool, u8, usize)>> {
    proptest::collection::vec((any::<bool>(), 0u8..12, 1usize..=4), 1..150)
}

proptest! {
    #[test]
    fn prop_counts_are_conserved(cap in 1usize..=8, ops in ops()) {
        let mut m = LinkedMultiHashSet::new(cap);
        let mut model: HashMap<u8, usize> = HashMap::new();

        for (is_add, e, n) in ops {
            if is_add {
                m.add_many(e, n);
                *model.entry(e).or_default() += n;
            } else {
                let have = model.get(&e).copied().unwrap_or(0);
                let res = m.remove_many(&e, n);
                if n > have {
                    prop_assert_eq!(res, Err(RemoveError::NotFound));
                } else {
                    prop_assert_eq!(res, Ok(have - n));
                    model.insert(e, have - n);
                }
            }

            prop_assert_eq!(m.len(), model.values().sum::<usize>());
            prop_assert_eq!(m.distinct_count(), model.values().filter(|c| **c > 0).count());
            for e in 0u8..12 {
                let want = model.get(&e).copied().unwrap_or(0);
                prop_assert_eq!(m.count(&e), want);
                prop_assert_eq!(m.contains(&e), want > 0);
            }
        }
    }

    #[test]
    fn prop_capacity_only_doubles(cap in 1usize..=8, ops in ops()) {
        let mut m = LinkedMultiHashSet::new(cap);
        let mut last = m.internal_capacity();
        prop_assert_eq!(last, cap);
        for (is_add, e, n) in ops {
            if is_add {
                m.add_many(e, n);
            } else {
                let _ = m.remove_many(&e, n);
            }
            let now = m.internal_capacity();
            prop_assert!(now == last || now == last * 2);
            prop_assert!(m.distinct_count() < now);
            last = now;
        }
    }

    #[test]
    fn prop_failed_removal_is_noop(cap in 1usize..=8, ops in ops(), victim in 0u8..12) {
        let mut m = LinkedMultiHashSet::new(cap);
        for (is_add, e, n) in ops {
            if is_add {
                m.add_many(e, n);
            }
        }
        let before: Vec<u8> = m.iter().copied().collect();
        let (len, distinct, cap) = (m.len(), m.distinct_count(), m.internal_capacity());

        let too_many = m.count(&victim) + 1;
        prop_assert_eq!(m.remove_many(&victim, too_many), Err(RemoveError::NotFound));

        prop_assert_eq!(m.iter().copied().collect::<Vec<_>>(), before);
        prop_assert_eq!((m.len(), m.distinct_count(), m.internal_capacity()), (len, distinct, cap));
    }
}
