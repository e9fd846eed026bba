//! Debug-only reentrancy detection for the multiset.
//!
//! Probing calls user `Eq` and `Hash` implementations while slot and list
//! state may be half-updated. If such code reaches back into the same
//! multiset, debug builds panic at the nested entry. Release builds keep only
//! the `!Send`/`!Sync` marker.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    // Single-threaded structure: raw pointer marker opts out of Send/Sync.
    _single_thread: PhantomData<*mut ()>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Mark the multiset busy until the returned guard drops.
    #[inline]
    pub(crate) fn enter(&self) -> Entered<'_> {
        #[cfg(debug_assertions)]
        assert!(
            !self.busy.replace(true),
            "reentrancy detected: multiset accessed from element Eq/Hash during an operation"
        );
        Entered {
            #[cfg(debug_assertions)]
            owner: self,
            #[cfg(not(debug_assertions))]
            _owner: PhantomData,
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Entered<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _owner: PhantomData<&'a ()>,
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.busy.set(false);
    }
}
