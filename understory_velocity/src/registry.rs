// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered callback registry with identity-based deduplication.
//!
//! Callbacks are shared as [`Rc`] and identified by the address of their
//! allocation: registering a clone of an already registered `Rc` is a no-op,
//! while two separately allocated closures with the same body are distinct.
//!
//! ```
//! use std::rc::Rc;
//! use understory_velocity::CallbackRegistry;
//!
//! let mut registry: CallbackRegistry<dyn Fn(f64)> = CallbackRegistry::new();
//! let cb: Rc<dyn Fn(f64)> = Rc::new(|_v: f64| {});
//!
//! assert!(registry.insert(cb.clone()));
//! assert!(!registry.insert(cb));
//! assert_eq!(registry.len(), 1);
//! ```

use alloc::rc::Rc;
use core::fmt;

use hashbrown::HashSet;
use smallvec::SmallVec;

/// Most surfaces register one or two callbacks per event.
const INLINE_CAPACITY: usize = 2;

/// A set of callbacks kept in first-registration order.
pub struct CallbackRegistry<F: ?Sized> {
    callbacks: SmallVec<[Rc<F>; INLINE_CAPACITY]>,
    identities: HashSet<*const ()>,
}

impl<F: ?Sized> CallbackRegistry<F> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            callbacks: SmallVec::new(),
            identities: HashSet::new(),
        }
    }

    /// Add `callback` unless the same allocation is already registered.
    ///
    /// Returns `true` if it was added.
    pub fn insert(&mut self, callback: Rc<F>) -> bool {
        if !self.identities.insert(identity(&callback)) {
            return false;
        }
        self.callbacks.push(callback);
        true
    }

    /// Returns `true` if the same allocation as `callback` is registered.
    pub fn contains(&self, callback: &Rc<F>) -> bool {
        self.identities.contains(&identity(callback))
    }

    /// Iterate callbacks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &F> + '_ {
        self.callbacks.iter().map(|cb| &**cb)
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Drop every registered callback.
    pub fn clear(&mut self) {
        self.callbacks.clear();
        self.identities.clear();
    }
}

impl<F: ?Sized> Default for CallbackRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for CallbackRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("len", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}

// Thin data pointer; vtable pointers are not a stable identity for `dyn` values.
fn identity<F: ?Sized>(callback: &Rc<F>) -> *const () {
    Rc::as_ptr(callback).cast::<()>()
}
