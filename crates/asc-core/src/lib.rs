// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Core data types for the asc semantic engine.
//!
//! This crate holds the leaf types everything else in the engine is built on:
//! - [`BitVector`]: growable bit set used for reaching-definition tracking
//! - Identifier newtypes for slots, namespaces, types and scopes
//! - [`NamespaceKind`] and the API version markers carried by namespace URIs
//! - [`NameKind`]: the binding kinds held by a symbol table
//! - [`TypeFamily`]: the type-id bitmask used for fast family tests
//!
//! # Design Principles
//!
//! - **Value types only**: nothing here knows about a compilation context
//! - **Host-testable**: the only dependency is `bitflags`

pub mod bitvec;
pub mod family;
pub mod ids;
pub mod kind;
pub mod namespace;

#[cfg(test)]
mod ids_test;

// Re-export commonly used types at crate root
pub use bitvec::BitVector;
pub use family::TypeFamily;
pub use ids::{NamespaceId, ScopeId, SlotId, TypeId};
pub use kind::NameKind;
pub use namespace::{MAX_API_MARK, MIN_API_MARK, NamespaceKind, api_version, strip_version};
