// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Compile-time scopes.
//!
//! A [`Scope`] is one frame of the scope chain: a package, a class, an
//! instance prototype, a function activation. It owns the bindings declared
//! in it and the slots they resolve to, and names the scopes it inherits
//! from. Scopes live in the [`Scopes`] arena and are addressed by
//! [`ScopeId`], so a class frame can be pushed by several chains.


use std::rc::Rc;

use asc_core::{NameKind, ScopeId, SlotId, TypeId};

use crate::error::SemanticsError;
use crate::names::Names;
use crate::namespace::{Multinames, Namespace};
use crate::slots::{Slot, SlotFlags, SlotIdAllocator, SlotStorage, Slots};
use crate::types::TypeInfo;

/// A name reference: a local name and the namespaces it may be qualified by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    /// Local name.
    pub name: Rc<str>,
    /// Candidate namespaces, in the order they are open.
    pub namespaces: Vec<Namespace>,
    /// Access kind.
    pub kind: NameKind,
    /// Character offset of the reference in the source.
    pub position: usize,
}

impl Reference {
    /// Creates a reference.
    #[must_use]
    pub fn new(
        name: impl Into<Rc<str>>,
        namespaces: Vec<Namespace>,
        kind: NameKind,
        position: usize,
    ) -> Self {
        Self {
            name: name.into(),
            namespaces,
            kind,
            position,
        }
    }
}

/// One frame of the scope chain.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    /// Bindings declared here.
    pub names: Names,
    /// Slots the bindings resolve to.
    pub slots: Slots,
    /// Inherited frames, searched after this one.
    pub bases: Vec<ScopeId>,
    /// Protected namespace of the class this frame belongs to.
    pub protected_ns: Option<Namespace>,
    /// Only setter lookups succeed (a constructor's initializer view).
    pub init_only: bool,
    /// Number of variable slots allocated so far.
    pub var_count: u32,
    /// Name for debug output.
    pub debug_name: String,
    /// Class or interface this frame belongs to.
    pub ty: Option<TypeId>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new(debug_name: impl Into<String>) -> Self {
        Self {
            debug_name: debug_name.into(),
            ..Self::default()
        }
    }

    /// Binds `name` to `slot`.
    ///
    /// Returns false, changing nothing, if exactly this name is already
    /// bound here.
    pub fn define_name(
        &mut self,
        kind: NameKind,
        name: &Rc<str>,
        ns: &Namespace,
        slot: SlotId,
    ) -> bool {
        let index = self.names.enter(name, ns, kind);
        if !self.names.entry(index).slot.is_null() {
            return false;
        }
        self.names.put(name, ns, kind, slot);
        true
    }

    /// Binds `name` to `slot` under each namespace.
    ///
    /// Returns the number of new bindings.
    pub fn define_names<'a>(
        &mut self,
        kind: NameKind,
        name: &Rc<str>,
        namespaces: impl IntoIterator<Item = &'a Namespace>,
        slot: SlotId,
    ) -> usize {
        namespaces
            .into_iter()
            .filter(|ns| self.define_name(kind, name, ns, slot))
            .count()
    }

    /// Unbinds exactly this name, returning its slot.
    pub fn remove_name(&mut self, kind: NameKind, name: &str, ns: &Namespace) -> Option<SlotId> {
        self.names.unbind(name, ns, kind)
    }

    /// Slot bound to `name` in this frame only.
    #[must_use]
    pub fn slot_index(&self, kind: NameKind, name: &str, ns: &Namespace) -> Option<SlotId> {
        if self.init_only && kind != NameKind::Set {
            return None;
        }
        self.names.lookup(name, ns, kind)
    }

    /// Allocates a variable slot.
    pub fn add_variable_slot(
        &mut self,
        ids: &mut SlotIdAllocator,
        ty: Option<TypeInfo>,
        declared_by: ScopeId,
    ) -> SlotId {
        let mut slot = Slot::new(ids.alloc());
        slot.ty = ty;
        slot.storage = SlotStorage::Variable {
            var_index: self.var_count,
        };
        slot.declared_by = Some(declared_by);
        self.var_count += 1;
        let id = slot.id;
        self.slots.insert(slot);
        id
    }

    /// Allocates a method slot.
    pub fn add_method_slot(
        &mut self,
        ids: &mut SlotIdAllocator,
        ty: Option<TypeInfo>,
        method_id: u32,
        declared_by: ScopeId,
    ) -> SlotId {
        let mut slot = Slot::new(ids.alloc());
        slot.ty = ty;
        slot.flags = SlotFlags::METHOD;
        slot.storage = SlotStorage::Method { method_id };
        slot.declared_by = Some(declared_by);
        let id = slot.id;
        self.slots.insert(slot);
        id
    }
}

/// Arena of every scope of a compilation.
#[derive(Clone, Debug, Default)]
pub struct Scopes {
    scopes: Vec<Scope>,
}

impl Scopes {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Number of scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns true if no scope was created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Adds a scope.
    pub fn alloc(&mut self, scope: Scope) -> ScopeId {
        let id = ScopeId::from_index(self.scopes.len());
        self.scopes.push(scope);
        id
    }

    /// The scope with this id.
    #[must_use]
    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    /// Mutable access to the scope with this id.
    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    /// The scope with this id, if it belongs to this arena.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticsError::UnknownScope`] for a foreign id.
    pub fn try_get(&self, id: ScopeId) -> Result<&Scope, SemanticsError> {
        self.scopes
            .get(id.index())
            .ok_or(SemanticsError::UnknownScope(id))
    }

    /// Iterates over every scope with its id.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ScopeId, &mut Scope)> {
        self.scopes
            .iter_mut()
            .enumerate()
            .map(|(i, s)| (ScopeId::from_index(i), s))
    }

    /// `id` followed by its bases, depth first, each scope once.
    fn lineage(&self, id: ScopeId) -> Vec<ScopeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if out.contains(&next) {
                continue;
            }
            out.push(next);
            stack.extend(self.get(next).bases.iter().rev());
        }
        out
    }

    /// Namespace to look `ns` up with in `base`, starting from `scope`.
    ///
    /// A protected name of a derived class is found through the base class
    /// under the base's own protected namespace.
    fn namespace_in<'a>(&'a self, scope: ScopeId, base: ScopeId, ns: &'a Namespace) -> &'a Namespace {
        let own = self.get(scope).protected_ns.as_ref();
        match (own, self.get(base).protected_ns.as_ref()) {
            (Some(own), Some(theirs)) if own == ns => theirs,
            _ => ns,
        }
    }

    /// Resolves a qualified name in `scope` or its bases.
    ///
    /// Returns the scope holding the binding and the slot.
    #[must_use]
    pub fn lookup(
        &self,
        scope: ScopeId,
        kind: NameKind,
        name: &str,
        ns: &Namespace,
    ) -> Option<(ScopeId, SlotId)> {
        self.lineage(scope).into_iter().find_map(|s| {
            let ns = self.namespace_in(scope, s, ns);
            self.get(s).slot_index(kind, name, ns).map(|slot| (s, slot))
        })
    }

    /// Returns true if `name` is bound in `scope` or its bases.
    #[must_use]
    pub fn has_name(&self, scope: ScopeId, kind: NameKind, name: &str, ns: &Namespace) -> bool {
        self.lookup(scope, kind, name, ns).is_some()
    }

    /// Returns true if `name` is bound under any namespace.
    #[must_use]
    pub fn has_name_unqualified(&self, scope: ScopeId, kind: NameKind, name: &str) -> bool {
        self.lineage(scope).into_iter().any(|s| {
            let frame = self.get(s);
            (!frame.init_only || kind == NameKind::Set) && frame.names.contains_name(name, kind)
        })
    }

    /// Candidate namespaces under which `name` is bound, with their slots.
    ///
    /// Returns `None` if none of them binds the name.
    #[must_use]
    pub fn has_names(
        &self,
        scope: ScopeId,
        kind: NameKind,
        name: &str,
        namespaces: &[Namespace],
    ) -> Option<Vec<(Namespace, SlotId)>> {
        let found: Vec<_> = namespaces
            .iter()
            .filter_map(|ns| {
                self.lookup(scope, kind, name, ns)
                    .map(|(_, slot)| (ns.clone(), slot))
            })
            .collect();
        (!found.is_empty()).then_some(found)
    }

    /// Slot `id` in `scope` or its bases.
    #[must_use]
    pub fn slot(&self, scope: ScopeId, id: SlotId) -> Option<&Slot> {
        self.lineage(scope)
            .into_iter()
            .find_map(|s| self.get(s).slots.get(id))
    }

    /// Mutable slot `id` in `scope` or its bases.
    pub fn slot_mut(&mut self, scope: ScopeId, id: SlotId) -> Option<&mut Slot> {
        let owner = self
            .lineage(scope)
            .into_iter()
            .find(|&s| self.get(s).slots.contains(id))?;
        self.get_mut(owner).slots.get_mut(id)
    }

    /// Readable bindings visible through `scope`, as exported to subclasses.
    ///
    /// Bindings of the scope itself shadow those inherited from bases.
    #[must_use]
    pub fn exported_multinames(&self, scope: ScopeId) -> Multinames {
        let mut out = Multinames::new();
        for s in self.lineage(scope).into_iter().rev() {
            out.put_all(&self.get(s).names.multinames());
        }
        out
    }
}
