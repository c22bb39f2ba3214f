// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot memoization keyed on input identity.
//!
//! Every derived structure in this crate is recomputed from scratch when its inputs
//! change; nothing is incrementally patched. The memo reproduces the source
//! environment's dependency-tracked recomputation without framework hooks: one cached
//! (key, value) pair per stage boundary, replaced whenever the key differs.

/// A one-entry cache: holds the last `(key, value)` pair and recomputes only when the
/// key changes.
#[derive(Clone, Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Creates an empty memo.
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Returns the cached value for `key`, computing and storing it first if the key
    /// differs from the cached one.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        let stale = !matches!(&self.slot, Some((cached, _)) if *cached == key);
        if stale {
            self.slot = Some((key, compute()));
        }
        let (_, value) = self.slot.as_ref().expect("slot filled above");
        value
    }

    /// Drops the cached entry.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Returns the cached value if `key` matches the cached key.
    pub fn get(&self, key: &K) -> Option<&V> {
        match &self.slot {
            Some((cached, value)) if cached == key => Some(value),
            _ => None,
        }
    }
}

impl<K: PartialEq, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
