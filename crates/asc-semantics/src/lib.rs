// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Symbol and type resolution for the asc compiler.
//!
//! This crate is the part of the compiler the binder and the code generator
//! consult for every name and every expression:
//! - [`namespace`]: interned namespaces, qualifier sets, multiname tables
//! - [`names`]: the `(name, namespace, kind)` symbol table
//! - [`slots`]: storage locations and slot id allocation
//! - [`scope`]: scope frames and reference lookup
//! - [`deferred`]: placeholders for namespaces resolved after binding
//! - [`types`]: the type registry, reaching-definition merge, and coercion
//! - [`diag`]: diagnostics and source positions
//!
//! All state of a compilation lives in a [`Context`]. Contexts share
//! nothing, so independent compilations may run side by side on separate
//! threads, each owning its context.

pub mod config;
pub mod context;
pub mod deferred;
pub mod diag;
pub mod error;
pub mod names;
pub mod namespace;
pub mod scope;
pub mod slots;
pub mod types;


pub use config::{CompilerConfig, Language};
pub use context::Context;
pub use diag::{CompilerHandler, Diagnostic, ErrorCode, RecordingHandler, Severity};
pub use error::SemanticsError;
pub use names::Names;
pub use namespace::{Multinames, Namespace, NamespaceRegistry, Qualifiers};
pub use scope::{Reference, Scope};
pub use slots::{Slot, SlotFlags, Value};
pub use types::{Builtin, QName, TypeInfo, TypeRegistry, TypeValue};
