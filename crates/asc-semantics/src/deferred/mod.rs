// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Deferred namespace resolution.
//!
//! A namespace attribute such as `ns var x` may name a namespace constant
//! the binder has not seen yet. The binder asks for a placeholder namespace,
//! binds definitions under it, and carries on. After binding, the
//! resolution pass looks each reference up again in the scope chain that
//! was current when the placeholder was requested and promotes the
//! placeholder to the namespace the reference denotes.
//!
//! Promotion keeps the placeholder's arena entry and records the target in
//! its indirection slot (see [`NamespaceRegistry::promote`]). Symbol tables
//! holding the placeholder are rewritten to the target so that lookups
//! under the real namespace find the definitions.
//!
//! [`NamespaceRegistry::promote`]: crate::namespace::NamespaceRegistry::promote


use asc_core::ScopeId;

use crate::context::Context;
use crate::diag::{ErrorCode, SourceFrame};
use crate::namespace::{Namespace, UNRESOLVED_PREFIX};
use crate::scope::Reference;

/// A placeholder awaiting resolution.
#[derive(Clone, Debug)]
pub struct PendingNamespace {
    /// The placeholder namespace handed to the binder.
    pub placeholder: Namespace,
    /// The reference naming the namespace.
    pub reference: Reference,
    /// Source frame current when the placeholder was requested.
    pub frame: SourceFrame,
    /// Scope chain current when the placeholder was requested.
    pub scopes: Vec<ScopeId>,
}

impl PendingNamespace {
    /// Returns true if `reference` names the same namespace as this entry.
    ///
    /// References match on local name and on the texts of their candidate
    /// namespaces, position by position.
    #[must_use]
    pub fn matches(&self, reference: &Reference) -> bool {
        self.reference.name == reference.name
            && self.reference.namespaces.len() == reference.namespaces.len()
            && self
                .reference
                .namespaces
                .iter()
                .zip(&reference.namespaces)
                .all(|(a, b)| a.text() == b.text())
    }
}

/// Placeholders awaiting resolution, in request order.
#[derive(Clone, Debug, Default)]
pub struct PendingNamespaces {
    entries: Vec<PendingNamespace>,
}

impl PendingNamespaces {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of pending placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a reference naming the same namespace as `reference`.
    #[must_use]
    pub fn find(&self, reference: &Reference) -> Option<&PendingNamespace> {
        self.entries.iter().find(|e| e.matches(reference))
    }

    /// Iterates in request order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingNamespace> {
        self.entries.iter()
    }

    fn push(&mut self, entry: PendingNamespace) {
        self.entries.push(entry);
    }

    fn take(&mut self) -> Vec<PendingNamespace> {
        core::mem::take(&mut self.entries)
    }
}

impl Context {
    /// Placeholder namespace for `reference`, to be resolved after binding.
    ///
    /// A second request for a reference with the same name and candidate
    /// namespace texts returns the first placeholder. A new placeholder
    /// captures the current source frame and scope chain.
    pub fn request_deferred_namespace(&mut self, reference: &Reference) -> Namespace {
        if let Some(existing) = self.pending.find(reference) {
            tracing::debug!(
                name = &*reference.name,
                placeholder = existing.placeholder.text(),
                "reused deferred namespace"
            );
            return existing.placeholder.clone();
        }

        let text = format!("{UNRESOLVED_PREFIX}{}", self.unresolved_count);
        self.unresolved_count += 1;
        let placeholder = self.namespaces.create_placeholder(&text);
        tracing::debug!(
            name = &*reference.name,
            placeholder = placeholder.text(),
            "created deferred namespace"
        );
        let entry = PendingNamespace {
            placeholder: placeholder.clone(),
            reference: reference.clone(),
            frame: self.frame().clone(),
            scopes: self.scope_chain().to_vec(),
        };
        self.pending.push(entry);
        placeholder
    }

    /// Pending placeholders.
    #[must_use]
    pub const fn pending_namespaces(&self) -> &PendingNamespaces {
        &self.pending
    }

    /// Adds the pending entries of a nested compilation.
    ///
    /// Entries for references already pending here are dropped.
    pub fn merge_pending(&mut self, other: PendingNamespaces) {
        for entry in other.entries {
            if self.pending.find(&entry.reference).is_none() {
                self.pending.push(entry);
            }
        }
    }

    /// Resolves every pending placeholder.
    ///
    /// Each reference is looked up in the scope chain captured with it. A
    /// binding whose value is a namespace promotes the placeholder. A
    /// binding with any other value leaves the placeholder as is, since the
    /// namespace is only known at runtime. A reference without a binding,
    /// or one whose namespace value leads back to its own placeholder, is
    /// reported as an unknown namespace against the captured source frame.
    /// The pending set is empty afterwards.
    pub fn resolve_pending_namespaces(&mut self) {
        let pending = self.pending.take();
        tracing::debug!(count = pending.len(), "resolving deferred namespaces");

        for entry in pending {
            let outer = self.swap_scope_chain(entry.scopes);
            let found = self.with_frame(entry.frame.clone(), |cx| cx.find_slot(&entry.reference));
            self.swap_scope_chain(outer);

            let unknown = match found {
                Ok(Some((scope, slot))) => {
                    let target = self
                        .scopes
                        .slot(scope, slot)
                        .and_then(|s| s.namespace_value().cloned());
                    target.is_some_and(|t| !self.promote_namespace(&entry.placeholder, &t))
                }
                Ok(None) => true,
                // Ambiguity was reported by the lookup.
                Err(_) => false,
            };
            if unknown {
                self.with_frame(entry.frame, |cx| {
                    cx.error(entry.reference.position, ErrorCode::UnknownNamespace, &[]);
                });
            }
        }
    }

    /// Promotes `placeholder` and rewrites its bindings. Returns false if
    /// `target` only leads back to the placeholder.
    fn promote_namespace(&mut self, placeholder: &Namespace, target: &Namespace) -> bool {
        if !self.namespaces.promote(placeholder.id(), target.id()) {
            return false;
        }
        let target = self.namespaces.resolve(target.id());
        let rewritten: usize = self
            .scopes
            .iter_mut()
            .map(|(_, scope)| scope.names.rename_namespace(placeholder.id(), &target))
            .sum();
        tracing::trace!(
            placeholder = placeholder.text(),
            target = target.text(),
            rewritten,
            "rewrote placeholder bindings"
        );
        true
    }
}
