// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Qualifier sets and multiname maps.
//!
//! [`Qualifiers`] answers "under which namespaces is this name defined, and
//! with which slot". [`Multinames`] maps local names to their qualifiers and
//! is what a scope exports to its subclasses.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::rc::Rc;

use asc_core::SlotId;

use super::Namespace;

/// Namespaces defining one name, each with its slot.
///
/// Ordered by namespace (kind, then text) so diagnostics list them stably.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Qualifiers {
    map: BTreeMap<Namespace, SlotId>,
}

impl Qualifiers {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Number of namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no namespace defines the name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Records `slot` under `ns`, returning the previous slot.
    pub fn insert(&mut self, ns: Namespace, slot: SlotId) -> Option<SlotId> {
        self.map.insert(ns, slot)
    }

    /// Removes `ns`, returning its slot.
    pub fn remove(&mut self, ns: &Namespace) -> Option<SlotId> {
        self.map.remove(ns)
    }

    /// Slot recorded under `ns`.
    #[must_use]
    pub fn get(&self, ns: &Namespace) -> Option<SlotId> {
        self.map.get(ns).copied()
    }

    /// Returns true if `ns` defines the name.
    #[must_use]
    pub fn contains(&self, ns: &Namespace) -> bool {
        self.map.contains_key(ns)
    }

    /// Iterates in namespace order.
    pub fn iter(&self) -> impl Iterator<Item = (&Namespace, SlotId)> {
        self.map.iter().map(|(ns, slot)| (ns, *slot))
    }

    /// Namespaces in order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.map.keys()
    }

    /// Printable namespace names, for ambiguity diagnostics.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        self.map.keys().map(Namespace::debug_text).collect()
    }
}

impl FromIterator<(Namespace, SlotId)> for Qualifiers {
    fn from_iter<I: IntoIterator<Item = (Namespace, SlotId)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

type NameMap = BTreeMap<Rc<str>, Qualifiers>;

/// Backing store of a [`Multinames`].
#[derive(Clone, Debug)]
enum Storage {
    /// Own map, possibly shared with tables that borrowed it.
    Owned(Rc<NameMap>),
    /// Alias of another table's map, taken by `put_all` into an empty table.
    /// `len` is the size of the delegate when the alias was taken.
    Borrowed { delegate: Rc<NameMap>, len: usize },
}

/// Map from local name to the qualifiers defining it.
///
/// Merging into an empty table aliases the source instead of copying. The
/// copy happens on the first mutation. Reads through an alias check that the
/// delegate still has the size it had when the alias was taken.
#[derive(Clone, Debug)]
pub struct Multinames {
    storage: Storage,
}

impl Default for Multinames {
    fn default() -> Self {
        Self::new()
    }
}

impl Multinames {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Storage::Owned(Rc::new(NameMap::new())),
        }
    }

    /// Returns true while this table is an uncopied alias of another.
    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        matches!(self.storage, Storage::Borrowed { .. })
    }

    fn map(&self) -> &NameMap {
        match &self.storage {
            Storage::Owned(map) => map,
            Storage::Borrowed { delegate, len } => {
                assert_eq!(
                    *len,
                    delegate.len(),
                    "multiname alias diverged from its delegate"
                );
                delegate
            }
        }
    }

    fn map_mut(&mut self) -> &mut NameMap {
        if let Storage::Borrowed { delegate, len } = &self.storage {
            assert_eq!(
                *len,
                delegate.len(),
                "multiname alias diverged from its delegate"
            );
            let copy = NameMap::clone(delegate);
            self.storage = Storage::Owned(Rc::new(copy));
        }
        match &mut self.storage {
            Storage::Owned(map) => Rc::make_mut(map),
            Storage::Borrowed { .. } => unreachable!("alias was just replaced by a copy"),
        }
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map().len()
    }

    /// Returns true if the table holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }

    /// Qualifiers of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Qualifiers> {
        self.map().get(name)
    }

    /// Returns true if `name` is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.map().contains_key(name)
    }

    /// Replaces the qualifiers of `name`.
    pub fn put(&mut self, name: Rc<str>, qualifiers: Qualifiers) -> Option<Qualifiers> {
        self.map_mut().insert(name, qualifiers)
    }

    /// Adds one namespace/slot pair to `name`.
    pub fn add(&mut self, name: &Rc<str>, ns: Namespace, slot: SlotId) {
        self.map_mut()
            .entry(Rc::clone(name))
            .or_default()
            .insert(ns, slot);
    }

    /// Removes `name`.
    pub fn remove(&mut self, name: &str) -> Option<Qualifiers> {
        self.map_mut().remove(name)
    }

    /// Merges `other` into this table.
    ///
    /// Into an empty table this takes an alias of `other`'s map. Otherwise
    /// qualifiers are merged per name, `other` winning on conflicts.
    pub fn put_all(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            let delegate = match &other.storage {
                Storage::Owned(map) | Storage::Borrowed { delegate: map, .. } => Rc::clone(map),
            };
            let len = other.len();
            self.storage = Storage::Borrowed { delegate, len };
            return;
        }
        let map = self.map_mut();
        for (name, quals) in other.map() {
            let target = map.entry(Rc::clone(name)).or_default();
            for (ns, slot) in quals.iter() {
                target.insert(ns.clone(), slot);
            }
        }
    }

    /// Iterates names in order.
    pub fn iter(&self) -> btree_map::Iter<'_, Rc<str>, Qualifiers> {
        self.map().iter()
    }
}

impl PartialEq for Multinames {
    fn eq(&self, other: &Self) -> bool {
        self.map() == other.map()
    }
}

impl Eq for Multinames {}
