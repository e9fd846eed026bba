//! MultiSet: the capability contract generic client code programs against.

use crate::error::RemoveError;

/// A collection counting occurrences of equal elements.
pub trait MultiSet<T> {
    /// Add `count` occurrences of `element`. Panics if `count == 0`.
    fn add_many(&mut self, element: T, count: usize);

    /// Remove `count` occurrences of `element`, returning how many remain.
    ///
    /// Fails with [`RemoveError::NotFound`] if the element is absent or has
    /// fewer than `count` occurrences. Panics if `count == 0`.
    fn remove_many(&mut self, element: &T, count: usize) -> Result<usize, RemoveError>;

    fn contains(&self, element: &T) -> bool;

    /// Number of occurrences of `element`; 0 if absent.
    fn count(&self, element: &T) -> usize;

    /// Total occurrences across all elements.
    fn len(&self) -> usize;

    fn distinct_count(&self) -> usize;

    /// Number of slots backing the collection. Never decreases.
    fn internal_capacity(&self) -> usize;

    fn add(&mut self, element: T) {
        self.add_many(element, 1)
    }

    fn remove(&mut self, element: &T) -> Result<usize, RemoveError> {
        self.remove_many(element, 1)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
