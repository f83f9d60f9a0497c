// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Symbol table for one scope.
//!
//! A [`Names`] table maps `(name, namespace, kind)` to a slot id. All kinds
//! of binding (getters, setters, variables, methods, local methods) share
//! one table.
//!
//! # Layout
//!
//! Entries are stored in parallel arrays (name, namespace, kind, slot, next
//! entry in chain). A power-of-two bucket array holds the index of the first
//! entry of each chain, or -1. The bucket is chosen from the hash of the name
//! alone, so every entry for a name sits on one chain. That gives two lookup
//! modes from a single walk:
//! - exact `(name, namespace, kind)` via [`Names::lookup`]
//! - every namespace defining a name via [`Names::get`]
//!
//! # Growth
//!
//! Buckets double when `5 * (count + 1) >= 4 * capacity`. The entry arrays
//! double while below 256 entries and then grow by 256 at a time.
//!
//! A fresh table allocates nothing, and every read on it returns without
//! hashing. Most block scopes never define a name.

#[cfg(test)]
mod names_test;

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use asc_core::{NameKind, NamespaceId, SlotId};
use rustc_hash::FxHasher;

use crate::namespace::{Multinames, Namespace, Qualifiers};

/// Bucket count of the first allocation.
const INITIAL_BUCKETS: usize = 8;

/// Entry count below which the entry arrays double.
const DOUBLING_LIMIT: usize = 256;

/// Chain terminator.
const END: i32 = -1;

/// One binding, as returned by iteration.
#[derive(Clone, Copy, Debug)]
pub struct NameEntry<'a> {
    /// Local name.
    pub name: &'a Rc<str>,
    /// Qualifying namespace.
    pub namespace: &'a Namespace,
    /// Binding kind.
    pub kind: NameKind,
    /// Bound slot, [`SlotId::NULL`] if unbound.
    pub slot: SlotId,
}

/// Hash-chained symbol table keyed by `(name, namespace, kind)`.
#[derive(Clone, Debug, Default)]
pub struct Names {
    names: Vec<Rc<str>>,
    namespaces: Vec<Namespace>,
    kinds: Vec<NameKind>,
    slots: Vec<SlotId>,
    next: Vec<i32>,
    buckets: Vec<i32>,
}

fn hash_name(name: &str) -> u64 {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    hasher.finish()
}

impl Names {
    /// The empty table. Reads on it never allocate.
    pub const EMPTY: Self = Self::new();

    /// Creates an empty table without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: Vec::new(),
            namespaces: Vec::new(),
            kinds: Vec::new(),
            slots: Vec::new(),
            next: Vec::new(),
            buckets: Vec::new(),
        }
    }

    /// Number of entries, unbound ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of hash buckets (0 until the first insert).
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Allocated entry capacity.
    #[must_use]
    pub fn entry_capacity(&self) -> usize {
        self.names.capacity()
    }

    fn bucket_of(&self, name: &str) -> usize {
        (hash_name(name) as usize) & (self.buckets.len() - 1)
    }

    /// Iterates over the entry indices on the chain for `name`.
    fn chain<'a>(&'a self, name: &'a str) -> impl Iterator<Item = usize> + 'a {
        let mut cursor = if self.buckets.is_empty() {
            END
        } else {
            self.buckets[self.bucket_of(name)]
        };
        core::iter::from_fn(move || {
            if cursor == END {
                return None;
            }
            let index = cursor as usize;
            cursor = self.next[index];
            Some(index)
        })
        .filter(move |&i| &*self.names[i] == name)
    }

    /// Index of the entry with exactly this key.
    fn find(&self, name: &str, ns: NamespaceId, kind: NameKind) -> Option<usize> {
        self.chain(name)
            .find(|&i| self.namespaces[i].id() == ns && self.kinds[i] == kind)
    }

    /// Slot bound to `name` in `ns` for a lookup of `kind`.
    ///
    /// A `Get` lookup is answered by any readable binding and a `Set` lookup
    /// by any writable one; other kinds match exactly.
    #[must_use]
    pub fn lookup(&self, name: &str, ns: &Namespace, kind: NameKind) -> Option<SlotId> {
        self.chain(name)
            .find(|&i| {
                self.namespaces[i].id() == ns.id()
                    && self.kinds[i].answers(kind)
                    && !self.slots[i].is_null()
            })
            .map(|i| self.slots[i])
    }

    /// Returns true if `name` is bound in `ns` for a lookup of `kind`.
    #[must_use]
    pub fn contains(&self, name: &str, ns: &Namespace, kind: NameKind) -> bool {
        self.lookup(name, ns, kind).is_some()
    }

    /// Returns true if `name` is bound in any namespace for `kind`.
    #[must_use]
    pub fn contains_name(&self, name: &str, kind: NameKind) -> bool {
        self.chain(name)
            .any(|i| self.kinds[i].answers(kind) && !self.slots[i].is_null())
    }

    /// Every namespace binding `name` for a lookup of `kind`.
    ///
    /// Returns `None` if there is none.
    #[must_use]
    pub fn get(&self, name: &str, kind: NameKind) -> Option<Qualifiers> {
        let quals: Qualifiers = self
            .chain(name)
            .filter(|&i| self.kinds[i].answers(kind) && !self.slots[i].is_null())
            .map(|i| (self.namespaces[i].clone(), self.slots[i]))
            .collect();
        (!quals.is_empty()).then_some(quals)
    }

    /// Finds or creates the entry for exactly this key.
    ///
    /// A new entry starts unbound. Returns the entry index.
    pub fn enter(&mut self, name: &Rc<str>, ns: &Namespace, kind: NameKind) -> usize {
        if let Some(i) = self.find(name, ns.id(), kind) {
            return i;
        }
        if 5 * (self.names.len() + 1) >= 4 * self.buckets.len() {
            self.rehash();
        }
        self.reserve_entry();

        let index = self.names.len();
        let bucket = self.bucket_of(name);
        self.names.push(Rc::clone(name));
        self.namespaces.push(ns.clone());
        self.kinds.push(kind);
        self.slots.push(SlotId::NULL);
        self.next.push(self.buckets[bucket]);
        self.buckets[bucket] = index as i32;
        index
    }

    /// Binds `slot` to exactly this key, returning the previously bound slot.
    pub fn put(
        &mut self,
        name: &Rc<str>,
        ns: &Namespace,
        kind: NameKind,
        slot: SlotId,
    ) -> Option<SlotId> {
        let i = self.enter(name, ns, kind);
        let prev = core::mem::replace(&mut self.slots[i], slot);
        (!prev.is_null()).then_some(prev)
    }

    /// Unbinds exactly this key, returning the slot it had.
    ///
    /// The entry stays in the table; entries are never removed individually.
    pub fn unbind(&mut self, name: &str, ns: &Namespace, kind: NameKind) -> Option<SlotId> {
        let i = self.find(name, ns.id(), kind)?;
        let prev = core::mem::replace(&mut self.slots[i], SlotId::NULL);
        (!prev.is_null()).then_some(prev)
    }

    /// Copies every bound entry of `other` into this table with its slot.
    pub fn put_all(&mut self, other: &Self) {
        for entry in other.iter() {
            self.put(entry.name, entry.namespace, entry.kind, entry.slot);
        }
    }

    /// Rewrites entries qualified by namespace `from` to namespace `to`.
    ///
    /// Used when a placeholder namespace is promoted. Bucket chains do not
    /// change since they depend on the name only. Returns the number of
    /// entries rewritten.
    ///
    /// Keys stay unique. When `to` already has an entry for the same name
    /// and kind, a bound entry there keeps its slot and the entry under
    /// `from` is unbound instead of renamed. An unbound one takes over the
    /// slot from `from`.
    pub fn rename_namespace(&mut self, from: NamespaceId, to: &Namespace) -> usize {
        if from == to.id() {
            return 0;
        }
        let mut count = 0;
        for i in 0..self.names.len() {
            if self.namespaces[i].id() != from {
                continue;
            }
            count += 1;
            let Some(existing) = self.find(&self.names[i], to.id(), self.kinds[i]) else {
                self.namespaces[i] = to.clone();
                continue;
            };
            let moved = core::mem::replace(&mut self.slots[i], SlotId::NULL);
            if self.slots[existing].is_null() {
                self.slots[existing] = moved;
            } else if !moved.is_null() {
                tracing::debug!(
                    name = &*self.names[i],
                    kept = self.slots[existing].as_u32(),
                    dropped = moved.as_u32(),
                    "placeholder binding shadowed by existing binding"
                );
            }
        }
        count
    }

    /// Entry at `index`, as returned by [`Names::enter`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is not an entry of this table.
    #[must_use]
    pub fn entry(&self, index: usize) -> NameEntry<'_> {
        assert!(
            index < self.names.len(),
            "name entry {index} outside table of {} entries",
            self.names.len()
        );
        NameEntry {
            name: &self.names[index],
            namespace: &self.namespaces[index],
            kind: self.kinds[index],
            slot: self.slots[index],
        }
    }

    /// Iterates over bound entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = NameEntry<'_>> {
        (0..self.names.len())
            .filter(|&i| !self.slots[i].is_null())
            .map(|i| self.entry(i))
    }

    /// Readable bindings grouped by name, as exported to subclasses.
    #[must_use]
    pub fn multinames(&self) -> Multinames {
        let mut out = Multinames::new();
        for entry in self.iter().filter(|e| e.kind.is_readable()) {
            out.add(entry.name, entry.namespace.clone(), entry.slot);
        }
        out
    }

    /// Grows the entry arrays ahead of a push.
    fn reserve_entry(&mut self) {
        let len = self.names.len();
        if len < self.names.capacity() {
            return;
        }
        let extra = if len < DOUBLING_LIMIT {
            len.max(4)
        } else {
            DOUBLING_LIMIT
        };
        self.names.reserve_exact(extra);
        self.namespaces.reserve_exact(extra);
        self.kinds.reserve_exact(extra);
        self.slots.reserve_exact(extra);
        self.next.reserve_exact(extra);
    }

    /// Doubles the bucket array and relinks every entry.
    fn rehash(&mut self) {
        let old = self.buckets.len();
        let new = if old == 0 { INITIAL_BUCKETS } else { old * 2 };
        tracing::trace!(old, new, entries = self.names.len(), "rehashing name table");

        self.buckets.clear();
        self.buckets.resize(new, END);
        for i in 0..self.names.len() {
            let bucket = self.bucket_of(&self.names[i]);
            self.next[i] = self.buckets[bucket];
            self.buckets[bucket] = i as i32;
        }
    }
}
