//! Ascending heapsort over an implicit 4-ary max-heap.
//!
//! Node `i` has children `4i + 1 ..= 4i + 4`.

/// Sort `input` ascending in place.
pub fn quaternary_heapsort<T: Ord>(input: &mut [T]) {
    let len = input.len();
    if len < 2 {
        return;
    }
    // Last node with a child is the parent of index `len - 1`.
    for start in (0..=(len - 2) / 4).rev() {
        quaternary_downheap(input, start, len);
    }
    for end in (1..len).rev() {
        input.swap(0, end);
        quaternary_downheap(input, 0, end);
    }
}

/// Sift `input[start]` down until it is no smaller than any of its children.
///
/// Only `input[..size]` is treated as part of the heap.
pub fn quaternary_downheap<T: Ord>(input: &mut [T], start: usize, size: usize) {
    debug_assert!(size <= input.len());
    let mut parent = start;
    loop {
        let first = 4 * parent + 1;
        if first >= size {
            return;
        }
        let last = (first + 4).min(size);
        let mut largest = first;
        for child in first + 1..last {
            if input[child] > input[largest] {
                largest = child;
            }
        }
        if input[largest] <= input[parent] {
            return;
        }
        input.swap(parent, largest);
        parent = largest;
    }
}
