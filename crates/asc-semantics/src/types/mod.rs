// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Types, the type registry, and the coercion engine.
//!
//! Types live in the [`TypeRegistry`] arena and are addressed by
//! [`TypeId`]. A [`TypeInfo`] is a type as seen at a use site: the type plus
//! its nullability and whether that nullability was written explicitly.
//!
//! The coercion algorithm and the reaching-definition type merge need the
//! whole compilation context (diagnostics, configuration, builtins), so they
//! are implemented on [`crate::Context`] in the `coerce` and `def_types`
//! submodules.

mod coerce;
mod def_types;
mod expr;
mod registry;

#[cfg(test)]
mod def_types_test;

use core::fmt;
use std::rc::Rc;

use asc_core::{ScopeId, TypeFamily, TypeId};

pub use def_types::DefTypes;
pub use expr::{BinaryOp, Expr, ExprKind};
pub use registry::{Builtin, TypeRegistry, VECTOR_NAMESPACE};

use crate::namespace::Namespace;

/// Namespace-qualified name.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct QName {
    /// Qualifying namespace.
    pub ns: Namespace,
    /// Local name.
    pub name: Rc<str>,
}

impl QName {
    /// Creates a qualified name.
    #[must_use]
    pub fn new(ns: Namespace, name: impl Into<Rc<str>>) -> Self {
        Self {
            ns,
            name: name.into(),
        }
    }
}

impl fmt::Display for QName {
    /// `name` in the unnamed namespace, `ns:name` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ns.text().is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}:{}", self.ns.text(), self.name)
        }
    }
}

/// A type as seen at a use site.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TypeInfo {
    /// The type.
    pub ty: TypeId,
    /// Whether `null` is a member.
    pub nullable: bool,
    /// Whether the nullability was annotated rather than defaulted.
    pub explicit: bool,
}

impl TypeInfo {
    /// Creates a type info.
    #[inline]
    #[must_use]
    pub const fn new(ty: TypeId, nullable: bool, explicit: bool) -> Self {
        Self {
            ty,
            nullable,
            explicit,
        }
    }
}

/// A class, interface, or builtin type.
#[derive(Clone, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct TypeValue {
    /// Qualified name.
    pub name: QName,
    /// Family bits used by the reaching-definition merge.
    pub family: TypeFamily,
    /// Base class.
    pub base: Option<TypeId>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    pub interfaces: Vec<TypeId>,
    /// Interface rather than class.
    pub is_interface: bool,
    /// Takes type arguments (`Vector`).
    pub is_parameterized: bool,
    /// Element type of a `Vector.<T>` instantiation.
    pub indexed_type: Option<TypeId>,
    /// Default nullability of the type.
    pub is_nullable: bool,
    /// Cannot be subclassed.
    pub is_final: bool,
    /// Instances accept dynamic properties.
    pub is_dynamic: bool,
    /// Definition has been processed (false for forward placeholders).
    pub resolved: bool,
    /// Protected namespace of instances.
    pub protected_ns: Namespace,
    /// Protected namespace of statics.
    pub static_protected_ns: Namespace,
    /// Class frame, created on first use.
    pub scope: Option<ScopeId>,
}

impl TypeValue {
    /// Creates a resolved, nullable type with no base class.
    #[must_use]
    pub const fn new(
        name: QName,
        family: TypeFamily,
        protected_ns: Namespace,
        static_protected_ns: Namespace,
    ) -> Self {
        Self {
            name,
            family,
            base: None,
            interfaces: Vec::new(),
            is_interface: false,
            is_parameterized: false,
            indexed_type: None,
            is_nullable: true,
            is_final: false,
            is_dynamic: false,
            resolved: true,
            protected_ns,
            static_protected_ns,
            scope: None,
        }
    }

    /// Printable local name.
    #[must_use]
    pub fn printable_name(&self) -> &str {
        &self.name.name
    }
}
