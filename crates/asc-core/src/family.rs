// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Type family bitmask.
//!
//! Every type carries a [`TypeFamily`] mask. Two types whose masks share no
//! bit can never hold the same runtime value, which is all the reaching
//! definitions merge needs to know.

use bitflags::bitflags;

bitflags! {
    /// Family bits of a type.
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
    pub struct TypeFamily: u32 {
        /// `Boolean` in ES3 dialects.
        const BOOLEAN = 1 << 0;
        /// Generic number family.
        const NUMBER = 1 << 1;
        /// `String`.
        const STRING = 1 << 2;
        /// The `null` type.
        const NULL = 1 << 4;
        /// `Boolean`.
        const BOOL = 1 << 5;
        /// `Number` / `double`.
        const DOUBLE = 1 << 6;
        /// `Class`.
        const TYPE = 1 << 7;
        /// `int`.
        const INT = 1 << 8;
        /// `uint`.
        const UINT = 1 << 9;
        /// `void`.
        const VOID = 1 << 10;
        /// `Function`.
        const FUNCTION = 1 << 11;
        /// `Array`.
        const ARRAY = 1 << 12;
        /// `Object` and user-defined classes.
        const OBJECT = 1 << 13;
        /// `XML` and `XMLList`.
        const XML = 1 << 14;
        /// The untyped `*`.
        const NONE = 1 << 15;
        /// `decimal`.
        const DECIMAL = 1 << 16;
    }
}

impl TypeFamily {
    /// Returns true if the two masks share at least one family bit.
    #[inline]
    #[must_use]
    pub const fn shares_family(self, other: Self) -> bool {
        self.intersects(other)
    }
}
