// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Binding kinds stored in a symbol table.

use core::fmt;

/// Kind of a binding: accessor, variable, or method.
///
/// A symbol table stores every kind side by side, so the same name and
/// namespace can carry a getter and a setter at once.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum NameKind {
    /// Getter, or a read of any readable binding.
    Get = 1,
    /// Setter, or a write of any writable binding.
    Set = 2,
    /// Variable, constant, or class binding.
    Var = 3,
    /// Method.
    Method = 4,
    /// Method local to a function body.
    LocalMethod = 8,
}

impl NameKind {
    /// Returns true if reading the binding is possible.
    #[inline]
    #[must_use]
    pub const fn is_readable(self) -> bool {
        !matches!(self, Self::Set)
    }

    /// Returns true if assigning the binding is possible.
    #[inline]
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Set | Self::Var)
    }

    /// Returns true if an entry of kind `self` answers a lookup of `query`.
    ///
    /// A `Get` lookup is answered by every readable entry and a `Set` lookup
    /// by every writable one. Other lookups need the exact kind.
    #[must_use]
    pub const fn answers(self, query: Self) -> bool {
        match query {
            Self::Get => self.is_readable(),
            Self::Set => self.is_writable(),
            _ => self as u8 == query as u8,
        }
    }

    /// The other accessor kind of `Get` or `Set`.
    #[must_use]
    pub const fn opposite_accessor(self) -> Option<Self> {
        match self {
            Self::Get => Some(Self::Set),
            Self::Set => Some(Self::Get),
            _ => None,
        }
    }

    /// Suffix used in qualified debug names.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Get => "/get",
            Self::Set => "/set",
            _ => "",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Var => "var",
            Self::Method => "method",
            Self::LocalMethod => "local method",
        })
    }
}
