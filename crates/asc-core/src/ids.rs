// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! ID types for slots, namespaces, types, and scopes.

use core::fmt;

/// Identifier of a slot within a compilation.
///
/// Slot IDs are handed out by the compilation context's allocator in
/// increasing order starting at [`SlotId::FIRST`]. ID 0 is reserved/invalid.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct SlotId(u32);

impl SlotId {
    /// The invalid/null slot ID.
    pub const NULL: Self = Self(0);

    /// The first ID handed out by a fresh allocator.
    pub const FIRST: Self = Self(1);

    /// Creates a new slot ID.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Checks if this is the null/invalid slot ID.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns the ID following this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({})", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot:{}", self.0)
    }
}

/// Generates an arena index newtype.
///
/// Arena indices start at 0 and index directly into the owning registry's
/// storage, so unlike [`SlotId`] they have no null value.
macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $display:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from an arena index.
            #[inline]
            #[must_use]
            pub const fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            /// Returns the arena index.
            #[inline]
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Returns the raw ID value.
            #[inline]
            #[must_use]
            pub const fn as_u32(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($display, ":{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Index of an interned namespace in the namespace registry.
    NamespaceId,
    "ns"
);

arena_id!(
    /// Index of a type in the type registry.
    TypeId,
    "type"
);

arena_id!(
    /// Index of a scope object in the scope arena.
    ScopeId,
    "scope"
);
