//! Error returned by multiset removal.

use core::fmt;

/// Removal failed: the element has no live entry, or fewer occurrences than
/// were asked for. The multiset is left unchanged.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RemoveError {
    NotFound,
}

impl fmt::Display for RemoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveError::NotFound => f.write_str("element not found in multiset"),
        }
    }
}

impl std::error::Error for RemoveError {}
