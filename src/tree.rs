//! Binary trees and their structural comparator.
//!
//! Two trees compare by left subtree, then root value, then right subtree,
//! recursively. An absent tree is less than any present tree and equal to
//! another absent one.

use core::cmp::Ordering;

/// A node owning its optional children.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BinaryTree<E> {
    value: E,
    left: Option<Box<BinaryTree<E>>>,
    right: Option<Box<BinaryTree<E>>>,
}

impl<E> BinaryTree<E> {
    pub fn leaf(value: E) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn new(value: E, left: Option<BinaryTree<E>>, right: Option<BinaryTree<E>>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn with_left(mut self, left: BinaryTree<E>) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    pub fn with_right(mut self, right: BinaryTree<E>) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    pub fn value(&self) -> &E {
        &self.value
    }

    pub fn left(&self) -> Option<&BinaryTree<E>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&BinaryTree<E>> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Compare two optional trees: left subtree, then value, then right subtree.
///
/// Recursion depth equals the height of the shallower path explored.
pub fn compare_trees<E: Ord>(a: Option<&BinaryTree<E>>, b: Option<&BinaryTree<E>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_trees(a.left(), b.left())
            .then_with(|| a.value.cmp(&b.value))
            .then_with(|| compare_trees(a.right(), b.right())),
    }
}

/// [`compare_trees`] as -1, 0 or +1.
pub fn compare_trees_signum<E: Ord>(a: Option<&BinaryTree<E>>, b: Option<&BinaryTree<E>>) -> i8 {
    compare_trees(a, b) as i8
}

impl<E: Ord> PartialOrd for BinaryTree<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Ord> Ord for BinaryTree<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_trees(Some(self), Some(other))
    }
}
