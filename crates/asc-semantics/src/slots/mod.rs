// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Slot registry.
//!
//! A slot is the storage location a binding resolves to. Each scope keeps
//! its slots in a [`Slots`] collection sorted by id. Ids come from the
//! context's [`SlotIdAllocator`], optionally replayed from an earlier pass
//! through a [`SlotIdCache`].


use std::collections::VecDeque;
use std::rc::Rc;

use asc_core::{BitVector, ScopeId, SlotId};
use bitflags::bitflags;

use crate::namespace::Namespace;
use crate::types::TypeInfo;

bitflags! {
    /// Attributes of a slot.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
    pub struct SlotFlags: u16 {
        /// Cannot be overridden.
        const FINAL = 1 << 0;
        /// Overrides a base class definition.
        const OVERRIDE = 1 << 1;
        /// Constant binding.
        const CONST = 1 << 2;
        /// Defined by an imported library.
        const IMPORTED = 1 << 3;
        /// Implemented natively by the runtime.
        const INTRINSIC = 1 << 4;
        /// Must be initialized before use.
        const NEEDS_INIT = 1 << 5;
        /// Method slot.
        const METHOD = 1 << 6;
        /// Getter slot.
        const GETTER = 1 << 7;
    }
}

/// Compile-time value bound to a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// A namespace constant (`namespace ns = "..."`).
    Namespace(Namespace),
    /// A class or interface.
    Type(asc_core::TypeId),
    /// Any other constant, in printable form.
    Constant(Rc<str>),
}

impl Value {
    /// The namespace, if this value is one.
    #[must_use]
    pub const fn as_namespace(&self) -> Option<&Namespace> {
        match self {
            Self::Namespace(ns) => Some(ns),
            _ => None,
        }
    }
}

/// Where a slot's value lives at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotStorage {
    /// Not assigned yet.
    #[default]
    Unassigned,
    /// Variable at an index in its scope's variable table.
    Variable {
        /// Index in the scope's variable table.
        var_index: u32,
    },
    /// Method with an id in the method table.
    Method {
        /// Method id.
        method_id: u32,
    },
}

/// A storage location.
#[derive(Clone, Debug, Default)]
pub struct Slot {
    /// Slot id.
    pub id: SlotId,
    /// Declared type.
    pub ty: Option<TypeInfo>,
    /// Parameter types of an overloaded or function slot.
    pub types: Vec<TypeInfo>,
    /// Compile-time value, if known.
    pub value: Option<Value>,
    /// Reaching-definition bits of every assignment to this slot.
    pub def_bits: BitVector,
    /// Attributes.
    pub flags: SlotFlags,
    /// Runtime storage.
    pub storage: SlotStorage,
    /// API version the definition belongs to.
    pub version: Option<u32>,
    /// Printable name for debug output.
    pub debug_name: Option<String>,
    /// Scope that declared the slot.
    pub declared_by: Option<ScopeId>,
    /// Slot invoked when the bound value is called.
    pub implicit_call: Option<SlotId>,
    /// Slot invoked when the bound value is constructed.
    pub implicit_construct: Option<SlotId>,
}

impl Slot {
    /// Creates an empty slot with the given id.
    #[must_use]
    pub fn new(id: SlotId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Unions `bits` into the slot's reaching-definition bits.
    pub fn add_def_bits(&mut self, bits: &BitVector) {
        self.def_bits = &self.def_bits | bits;
    }

    /// Returns true for constant slots.
    #[must_use]
    pub const fn is_const(&self) -> bool {
        self.flags.contains(SlotFlags::CONST)
    }

    /// Returns true for method slots.
    #[must_use]
    pub const fn is_method(&self) -> bool {
        self.flags.contains(SlotFlags::METHOD)
    }

    /// The bound namespace, if the value is one.
    #[must_use]
    pub fn namespace_value(&self) -> Option<&Namespace> {
        self.value.as_ref().and_then(Value::as_namespace)
    }
}

/// Slots of one scope, sorted by id.
#[derive(Clone, Debug, Default)]
pub struct Slots {
    slots: Vec<Slot>,
}

impl Slots {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Inserts `slot` at its sorted position.
    ///
    /// If a slot with the same id exists, nothing changes. Returns the
    /// slot's position.
    pub fn insert(&mut self, slot: Slot) -> usize {
        match self.slots.binary_search_by_key(&slot.id, |s| s.id) {
            Ok(i) => i,
            Err(i) => {
                self.slots.insert(i, slot);
                i
            }
        }
    }

    fn position(&self, id: SlotId) -> Option<usize> {
        let (first, last) = (self.slots.first()?, self.slots.last()?);
        if id < first.id || id > last.id {
            return None;
        }
        self.slots.binary_search_by_key(&id, |s| s.id).ok()
    }

    /// Slot with the given id.
    #[must_use]
    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.position(id).map(|i| &self.slots[i])
    }

    /// Mutable slot with the given id.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        self.position(id).map(|i| &mut self.slots[i])
    }

    /// Returns true if a slot with this id exists.
    #[must_use]
    pub fn contains(&self, id: SlotId) -> bool {
        self.position(id).is_some()
    }

    /// Iterates in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }
}

/// Hands out slot ids for one compilation.
///
/// Ids increase from [`SlotId::FIRST`]. A caller re-linking an earlier pass
/// can request that the next allocation return a specific id; the request
/// applies to exactly one allocation.
#[derive(Clone, Debug)]
pub struct SlotIdAllocator {
    next: u32,
    expected: Option<SlotId>,
}

impl Default for SlotIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotIdAllocator {
    /// Creates an allocator starting at [`SlotId::FIRST`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: SlotId::FIRST.as_u32(),
            expected: None,
        }
    }

    /// Makes the next [`alloc`](Self::alloc) return `id`.
    pub const fn expect_next(&mut self, id: SlotId) {
        self.expected = Some(id);
    }

    /// Returns the pending override, if any.
    #[must_use]
    pub const fn expected(&self) -> Option<SlotId> {
        self.expected
    }

    /// Allocates the next id.
    pub fn alloc(&mut self) -> SlotId {
        if let Some(id) = self.expected.take() {
            tracing::trace!(slot = id.as_u32(), "consumed slot id override");
            return id;
        }
        let id = SlotId::new(self.next);
        self.next += 1;
        id
    }

    /// Id the counter will hand out next, ignoring any override.
    #[must_use]
    pub const fn peek(&self) -> SlotId {
        SlotId::new(self.next)
    }
}

/// Replays the ids of an earlier slot set.
///
/// Built from a scope's slots, it hands out their ids again in order, one
/// contiguous block at a time, and falls back to the allocator once they
/// are used up. Rebuilding a scope through a cache assigns the same ids the
/// first build did.
#[derive(Clone, Debug, Default)]
pub struct SlotIdCache {
    /// Half-open id ranges still to hand out.
    ranges: VecDeque<(u32, u32)>,
}

impl SlotIdCache {
    /// Collects the contiguous id blocks of `slots`.
    #[must_use]
    pub fn from_slots(slots: &Slots) -> Self {
        let mut ranges: VecDeque<(u32, u32)> = VecDeque::new();
        for id in slots.iter().map(|s| s.id.as_u32()) {
            match ranges.back_mut() {
                Some((_, end)) if *end == id => *end += 1,
                _ => ranges.push_back((id, id + 1)),
            }
        }
        Self { ranges }
    }

    /// Number of ids left to replay.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.ranges.iter().map(|(s, e)| (e - s) as usize).sum()
    }

    /// Next replayed id, or a fresh one from `alloc`.
    pub fn next_id(&mut self, alloc: &mut SlotIdAllocator) -> SlotId {
        let Some((start, end)) = self.ranges.front_mut() else {
            return alloc.alloc();
        };
        let id = SlotId::new(*start);
        *start += 1;
        if *start == *end {
            self.ranges.pop_front();
        }
        id
    }
}
