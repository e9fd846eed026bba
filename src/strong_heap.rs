//! Strong binary heap validation.
//!
//! A strong heap is a complete binary tree in max-heap order (every child
//! strictly smaller than its parent) where, additionally, every grandparent
//! strictly exceeds the sum of any grandchild and that grandchild's parent.

use crate::tree::BinaryTree;
use std::collections::VecDeque;

/// True if `root` is complete, max-heap ordered and satisfies the
/// grandparent sum constraint.
pub fn is_strong_heap(root: &BinaryTree<i64>) -> bool {
    is_complete(root) && satisfies_order(root, None)
}

/// Level-order check: after the first missing child, no node may have children.
fn is_complete<E>(root: &BinaryTree<E>) -> bool {
    let mut queue = VecDeque::from([root]);
    let mut gap = false;
    while let Some(node) = queue.pop_front() {
        for child in [node.left(), node.right()] {
            match child {
                Some(_) if gap => return false,
                Some(c) => queue.push_back(c),
                None => gap = true,
            }
        }
    }
    true
}

fn satisfies_order(node: &BinaryTree<i64>, parent: Option<i64>) -> bool {
    let value = *node.value();
    [node.left(), node.right()].into_iter().flatten().all(|child| {
        let c = *child.value();
        // i128 keeps the sum exact for any pair of i64 values.
        c < value
            && parent.map_or(true, |g| i128::from(value) + i128::from(c) < i128::from(g))
            && satisfies_order(child, Some(value))
    })
}
