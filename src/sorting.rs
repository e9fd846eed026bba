//! In-place comparison sorts over mutable slices.
//!
//! Every routine takes the slice only for the duration of the call. Only
//! `insertion_sort` and `merge_sort` are stable.

use core::cmp::Ordering;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// True if `a` must come strictly before `b`.
    #[inline]
    fn precedes<T: Ord>(self, a: &T, b: &T) -> bool {
        let want = match self {
            SortOrder::Ascending => Ordering::Less,
            SortOrder::Descending => Ordering::Greater,
        };
        a.cmp(b) == want
    }
}

/// Repeatedly select the extreme of the unsorted suffix and swap it into place.
pub fn selection_sort<T: Ord>(input: &mut [T], order: SortOrder) {
    for i in 0..input.len() {
        let mut best = i;
        for j in i + 1..input.len() {
            if order.precedes(&input[j], &input[best]) {
                best = j;
            }
        }
        input.swap(i, best);
    }
}

/// Shift each element left past every element it precedes.
pub fn insertion_sort<T: Ord>(input: &mut [T], order: SortOrder) {
    for i in 1..input.len() {
        let mut j = i;
        while j > 0 && order.precedes(&input[j], &input[j - 1]) {
            input.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Top-down merge sort with one auxiliary buffer.
pub fn merge_sort<T: Ord + Clone>(input: &mut [T], order: SortOrder) {
    if input.len() < 2 {
        return;
    }
    let mut aux = input.to_vec();
    merge_sort_into(input, &mut aux, order);
}

fn merge_sort_into<T: Ord + Clone>(input: &mut [T], aux: &mut [T], order: SortOrder) {
    let len = input.len();
    if len < 2 {
        return;
    }
    let mid = len / 2;
    merge_sort_into(&mut input[..mid], &mut aux[..mid], order);
    merge_sort_into(&mut input[mid..], &mut aux[mid..], order);

    aux.clone_from_slice(input);
    let (left, right) = aux.split_at(mid);
    let (mut i, mut j) = (0, 0);
    for slot in input.iter_mut() {
        // Ties take from the left run to keep the sort stable.
        let take_left = j == right.len() || (i < left.len() && !order.precedes(&right[j], &left[i]));
        if take_left {
            slot.clone_from(&left[i]);
            i += 1;
        } else {
            slot.clone_from(&right[j]);
            j += 1;
        }
    }
}

/// Quicksort with the middle element as pivot at every step.
///
/// Recurses into the smaller partition and loops on the larger, so stack
/// depth stays logarithmic whatever the input.
pub fn quick_sort<T: Ord>(mut input: &mut [T], order: SortOrder) {
    while input.len() >= 2 {
        let split = partition(input, order);
        let (before, rest) = core::mem::take(&mut input).split_at_mut(split);
        let after = &mut rest[1..];
        if before.len() < after.len() {
            quick_sort(before, order);
            input = after;
        } else {
            quick_sort(after, order);
            input = before;
        }
    }
}

/// Partition around the middle element; returns the pivot's final index.
fn partition<T: Ord>(input: &mut [T], order: SortOrder) -> usize {
    let last = input.len() - 1;
    input.swap(last / 2, last);

    // Unscanned window is lo..hi; the pivot waits at `last`.
    let (mut lo, mut hi) = (0, last);
    while lo < hi {
        while lo < hi && order.precedes(&input[lo], &input[last]) {
            lo += 1;
        }
        while lo < hi && order.precedes(&input[last], &input[hi - 1]) {
            hi -= 1;
        }
        if lo < hi {
            input.swap(lo, hi - 1);
            lo += 1;
            hi -= 1;
        }
    }
    input.swap(lo, last);
    lo
}
