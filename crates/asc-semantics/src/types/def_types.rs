// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Types recorded per reaching definition, and their merge.

use asc_core::BitVector;

use super::{Builtin, TypeInfo};
use crate::context::Context;

/// Sparse map from definition-site bit position to the type inferred there.
#[derive(Clone, Debug, Default)]
pub struct DefTypes {
    types: Vec<Option<TypeInfo>>,
}

impl DefTypes {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Number of positions the array covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing was ever recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Type recorded at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<TypeInfo> {
        self.types.get(position).copied().flatten()
    }

    /// Records `ty` at `position`, growing the array. Returns the previous
    /// entry.
    pub fn set(&mut self, position: usize, ty: TypeInfo) -> Option<TypeInfo> {
        if position >= self.types.len() {
            self.types.resize(position + 1, None);
        }
        self.types[position].replace(ty)
    }
}

impl Context {
    /// Records the type of the definition at the lowest set bit of `bits`.
    ///
    /// Only one definition site is expected; higher bits are ignored. A
    /// different type already recorded there is overwritten.
    pub fn set_def_type(&mut self, bits: &BitVector, ty: TypeInfo) {
        let Some(position) = bits.first_set_bit() else {
            return;
        };
        if let Some(old) = self.def_types.set(position, ty)
            && old.ty != ty.ty
        {
            tracing::warn!(
                position,
                old = %self.types.name(old.ty),
                new = %self.types.name(ty.ty),
                "definition site retyped"
            );
        }
    }

    /// Joins the types of every definition reaching through `bits`.
    ///
    /// Any definition without a recorded type makes the result `*`, as do
    /// two definitions whose types share no family bit. An empty vector
    /// reaches nothing and also yields `*`.
    pub fn get_def_type(&mut self, bits: &BitVector) -> TypeInfo {
        let void = self.builtin(Builtin::Void);
        let any = self.builtin_info(Builtin::Any);
        let mut joined: Option<TypeInfo> = None;

        for position in bits {
            let Some(ty) = self.def_types.get(position) else {
                return any;
            };
            match joined {
                Some(j) if j.ty != void => {
                    let family = self.types.get(j.ty).family;
                    if !family.shares_family(self.types.get(ty.ty).family) {
                        return any;
                    }
                }
                _ => joined = Some(ty),
            }
        }

        joined.unwrap_or(any)
    }

    /// Recorded definition types.
    #[must_use]
    pub const fn def_types(&self) -> &DefTypes {
        &self.def_types
    }
}
