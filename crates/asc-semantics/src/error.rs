// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Error types returned by the semantic engine's API.
//!
//! User-facing problems in the compiled program are not errors in this
//! sense: they go through the diagnostics channel (see [`crate::diag`]) and
//! compilation continues. [`SemanticsError`] covers calls the engine cannot
//! answer at all.

use asc_core::ScopeId;
use thiserror::Error;

/// Errors returned by lookups and configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticsError {
    /// A name is defined under more than one of the candidate namespaces.
    #[error("ambiguous reference to '{name}' (defined in {})", namespaces.join(", "))]
    AmbiguousReference {
        /// The referenced local name.
        name: String,
        /// Printable names of the namespaces defining it.
        namespaces: Vec<String>,
    },

    /// A language code outside the supported set.
    #[error("unknown language code '{0}'")]
    UnknownLanguage(String),

    /// Type arguments were applied to a type that takes none.
    #[error("type '{0}' is not parameterized")]
    NotParameterized(String),

    /// A scope id that does not belong to this context.
    #[error("unknown scope {0}")]
    UnknownScope(ScopeId),
}
