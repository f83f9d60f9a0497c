// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Namespace registry.
//!
//! Namespaces are interned per compilation context by `(text, kind)`. The
//! same text may exist under several kinds; each is a distinct identity.
//! Interned namespaces live in an arena and are addressed by
//! [`NamespaceId`]; a [`Namespace`] is a cheap handle carrying the id plus
//! the kind and text needed for ordering and printing.
//!
//! Placeholders for namespaces that are only known after binding (see
//! [`crate::deferred`]) are arena entries that are not reachable through the
//! intern map. Promoting a placeholder records the resolved namespace in the
//! arena's indirection slot for that id; the placeholder's own entry is
//! never rewritten, so ordered collections keyed by a placeholder handle
//! stay consistent.

mod qualifiers;

#[cfg(test)]
mod qualifiers_test;

use core::fmt;
use std::rc::Rc;

use asc_core::{NamespaceId, NamespaceKind, api_version, strip_version};
use rustc_hash::FxHashMap;

pub use qualifiers::{Multinames, Qualifiers};

/// Text of the public namespace.
pub const PUBLIC_TEXT: &str = "";

/// Text of the any namespace.
pub const ANY_TEXT: &str = "*";

/// Prefix of placeholder namespace names.
pub const UNRESOLVED_PREFIX: &str = "__unresolved__ns__";

/// Handle to an interned namespace.
///
/// Handles order by kind, then text, then id. Two handles are equal iff they
/// refer to the same arena entry.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Namespace {
    kind: NamespaceKind,
    text: Rc<str>,
    id: NamespaceId,
}

impl Namespace {
    /// Arena id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> NamespaceId {
        self.id
    }

    /// Access kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> NamespaceKind {
        self.kind
    }

    /// Interned text, without version marker.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared interned text.
    #[must_use]
    pub fn text_rc(&self) -> Rc<str> {
        Rc::clone(&self.text)
    }

    /// Returns true for the public namespace kind.
    #[inline]
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.kind == NamespaceKind::Public
    }

    /// Text with the kind suffix, e.g. `flash.display$internal`.
    #[must_use]
    pub fn debug_text(&self) -> String {
        format!("{}{}", self.text, self.kind.suffix())
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({}, {:?}, {:?})", self.id.as_u32(), self.kind, &*self.text)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// State of an arena entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum EntryState {
    /// Reachable through the intern map (or was, before removal).
    Interned,
    /// Placeholder awaiting resolution.
    Placeholder,
    /// Placeholder resolved to another namespace.
    Promoted(NamespaceId),
}

#[derive(Debug)]
struct Entry {
    kind: NamespaceKind,
    text: Rc<str>,
    version: Option<u32>,
    state: EntryState,
}

/// Number of namespace kinds, for the per-text kind table.
const KIND_COUNT: usize = NamespaceKind::ALL.len();

/// Interning registry for namespaces.
#[derive(Debug, Default)]
pub struct NamespaceRegistry {
    entries: Vec<Entry>,
    /// Text to per-kind id. One map with a composite `(text, kind)` key,
    /// the kind resolved by array index.
    interned: FxHashMap<Rc<str>, [Option<NamespaceId>; KIND_COUNT]>,
}

impl NamespaceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of arena entries, placeholders included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was ever interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interns `text` under `kind`, returning the existing namespace if any.
    ///
    /// A trailing API version marker is stripped before interning and
    /// recorded on the entry created by the first call.
    pub fn intern(&mut self, uri: &str, kind: NamespaceKind) -> Namespace {
        let stripped = strip_version(uri);
        if let Some(id) = self.interned.get(stripped).and_then(|ids| ids[kind as usize]) {
            return self.handle(id);
        }

        let text: Rc<str> = match self.interned.get_key_value(stripped) {
            Some((key, _)) => Rc::clone(key),
            None => Rc::from(stripped),
        };
        let id = self.push(Entry {
            kind,
            text: Rc::clone(&text),
            version: api_version(uri),
            state: EntryState::Interned,
        });
        self.interned.entry(text).or_default()[kind as usize] = Some(id);
        tracing::debug!(namespace = stripped, ?kind, id = id.as_u32(), "interned namespace");
        self.handle(id)
    }

    fn push(&mut self, entry: Entry) -> NamespaceId {
        let id = NamespaceId::from_index(self.entries.len());
        self.entries.push(entry);
        id
    }

    /// Returns the namespace interned as `(text, kind)`, if any.
    #[must_use]
    pub fn get(&self, text: &str, kind: NamespaceKind) -> Option<Namespace> {
        let id = self.interned.get(strip_version(text))?[kind as usize]?;
        Some(self.handle(id))
    }

    /// Returns true if a public namespace with this text exists.
    #[must_use]
    pub fn is_namespace(&self, text: &str) -> bool {
        self.get(text, NamespaceKind::Public).is_some()
    }

    /// Returns true if `ns` is still reachable through the intern map.
    ///
    /// Private, protected and internal namespaces are checked under their
    /// own kind. Every other kind is checked against the public namespaces
    /// with the same text.
    #[must_use]
    pub fn contains(&self, ns: &Namespace) -> bool {
        let kind = match ns.kind {
            NamespaceKind::Private | NamespaceKind::Protected | NamespaceKind::Internal => ns.kind,
            NamespaceKind::Public | NamespaceKind::Explicit | NamespaceKind::StaticProtected => {
                NamespaceKind::Public
            }
        };
        self.get(&ns.text, kind).is_some()
    }

    /// Removes `text` from the intern map under every kind.
    ///
    /// Existing handles stay valid; the next `intern` of the same text
    /// creates a fresh identity.
    pub fn remove_namespace(&mut self, text: &str) -> bool {
        self.interned.remove(strip_version(text)).is_some()
    }

    /// Creates a placeholder entry that is not reachable by text.
    pub fn create_placeholder(&mut self, text: &str) -> Namespace {
        let id = self.push(Entry {
            kind: NamespaceKind::Public,
            text: Rc::from(text),
            version: None,
            state: EntryState::Placeholder,
        });
        self.handle(id)
    }

    /// Records that placeholder `placeholder` resolved to `target`.
    ///
    /// Returns false, leaving the placeholder unresolved, if `target` stands
    /// for the placeholder itself.
    ///
    /// # Panics
    ///
    /// Panics if `placeholder` is not an unresolved placeholder.
    pub fn promote(&mut self, placeholder: NamespaceId, target: NamespaceId) -> bool {
        let target = self.canonical(target);
        let entry = &mut self.entries[placeholder.index()];
        assert!(
            entry.state == EntryState::Placeholder,
            "promoting {placeholder} which is not a pending placeholder"
        );
        if target == placeholder {
            tracing::debug!(placeholder = &*entry.text, "namespace placeholder resolves to itself");
            return false;
        }
        entry.state = EntryState::Promoted(target);
        tracing::debug!(
            placeholder = &*entry.text,
            target = target.as_u32(),
            "promoted namespace placeholder"
        );
        true
    }

    /// Follows promotions to the namespace an id stands for.
    #[must_use]
    pub fn canonical(&self, mut id: NamespaceId) -> NamespaceId {
        while let EntryState::Promoted(next) = self.entries[id.index()].state {
            id = next;
        }
        id
    }

    /// Returns true if `id` is a placeholder that has not been promoted.
    #[must_use]
    pub fn is_placeholder(&self, id: NamespaceId) -> bool {
        self.entries
            .get(id.index())
            .is_some_and(|e| e.state == EntryState::Placeholder)
    }

    /// Returns true if `id` was a placeholder and has been promoted.
    #[must_use]
    pub fn is_promoted(&self, id: NamespaceId) -> bool {
        self.entries
            .get(id.index())
            .is_some_and(|e| matches!(e.state, EntryState::Promoted(_)))
    }

    /// Handle for the namespace an id currently stands for.
    ///
    /// For a promoted placeholder this is the resolved namespace.
    #[must_use]
    pub fn resolve(&self, id: NamespaceId) -> Namespace {
        self.handle(self.canonical(id))
    }

    /// Handle for exactly this arena entry.
    #[must_use]
    pub fn handle(&self, id: NamespaceId) -> Namespace {
        let entry = &self.entries[id.index()];
        Namespace {
            kind: entry.kind,
            text: Rc::clone(&entry.text),
            id,
        }
    }

    /// API version recorded when the namespace was interned.
    #[must_use]
    pub fn version(&self, id: NamespaceId) -> Option<u32> {
        self.entries[self.canonical(id).index()].version
    }
}
