// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Compilation context.
//!
//! One [`Context`] holds everything the binder shares across a compilation:
//! configuration, the diagnostic reporter and current source frame, the
//! namespace and type registries, the scope arena and chain, the slot id
//! counter, pending deferred namespaces, and recorded definition types.
//! Nothing is global; two contexts never share state.

#[cfg(test)]
mod context_test;

use std::rc::Rc;

use asc_core::{NameKind, NamespaceKind, ScopeId, SlotId, TypeId};

use crate::config::CompilerConfig;
use crate::deferred::PendingNamespaces;
use crate::diag::{CompilerHandler, ErrorCode, Reporter, Severity, SourceFrame};
use crate::error::SemanticsError;
use crate::namespace::{ANY_TEXT, Namespace, NamespaceRegistry, PUBLIC_TEXT};
use crate::scope::{Reference, Scope, Scopes};
use crate::slots::{Slot, SlotIdAllocator};
use crate::types::{Builtin, DefTypes, QName, TypeInfo, TypeRegistry};

/// State of one compilation.
#[derive(Debug)]
pub struct Context {
    pub(crate) config: CompilerConfig,
    reporter: Reporter,
    frame: SourceFrame,
    pub(crate) namespaces: NamespaceRegistry,
    pub(crate) types: TypeRegistry,
    pub(crate) scopes: Scopes,
    chain: Vec<ScopeId>,
    slot_ids: SlotIdAllocator,
    pub(crate) pending: PendingNamespaces,
    pub(crate) def_types: DefTypes,
    ticket: u32,
    pub(crate) unresolved_count: u32,
    versions: Vec<u32>,
}

impl Context {
    /// Creates a context with an empty scope chain.
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            reporter: Reporter::new(config),
            frame: SourceFrame::default(),
            namespaces: NamespaceRegistry::new(),
            types: TypeRegistry::new(config.numerics),
            scopes: Scopes::new(),
            chain: Vec::new(),
            slot_ids: SlotIdAllocator::new(),
            pending: PendingNamespaces::new(),
            def_types: DefTypes::new(),
            ticket: 0,
            unresolved_count: 0,
            versions: Vec::new(),
        }
    }

    /// Compilation switches.
    #[must_use]
    pub const fn config(&self) -> &CompilerConfig {
        &self.config
    }

    // -------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------

    /// Installs the diagnostic handler, returning the previous one.
    pub fn set_handler(
        &mut self,
        handler: Box<dyn CompilerHandler>,
    ) -> Option<Box<dyn CompilerHandler>> {
        self.reporter.set_handler(handler)
    }

    /// Reports an error at `pos` in the current frame.
    pub fn error(&mut self, pos: usize, code: ErrorCode, args: &[&str]) {
        self.reporter
            .report(Severity::Error, &self.frame, pos, code, args);
    }

    /// Reports a warning at `pos` in the current frame.
    pub fn warning(&mut self, pos: usize, code: ErrorCode, args: &[&str]) {
        self.reporter
            .report(Severity::Warning, &self.frame, pos, code, args);
    }

    /// Reports a compiler defect. Counted as an error.
    pub fn internal_error(&mut self, pos: usize, message: &str) {
        self.error(pos, ErrorCode::InternalError, &[message]);
    }

    /// Number of errors reported so far.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.reporter.error_count()
    }

    /// Number of warnings reported so far.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.reporter.warning_count()
    }

    /// Tells the handler that another file is being imported.
    pub fn import_file(&mut self, filename: &str) {
        self.reporter.import_file(filename);
    }

    // -------------------------------------------------------------------
    // Source frames
    // -------------------------------------------------------------------

    /// Source frame diagnostics are reported against.
    #[must_use]
    pub const fn frame(&self) -> &SourceFrame {
        &self.frame
    }

    /// Makes `frame` current, returning the previous one.
    pub fn switch_to_frame(&mut self, frame: SourceFrame) -> SourceFrame {
        core::mem::replace(&mut self.frame, frame)
    }

    /// Runs `f` with `frame` current, then restores the outer frame.
    pub fn with_frame<R>(&mut self, frame: SourceFrame, f: impl FnOnce(&mut Self) -> R) -> R {
        let outer = self.switch_to_frame(frame);
        let result = f(self);
        self.frame = outer;
        result
    }

    // -------------------------------------------------------------------
    // Namespaces
    // -------------------------------------------------------------------

    /// Namespace registry.
    #[must_use]
    pub const fn namespaces(&self) -> &NamespaceRegistry {
        &self.namespaces
    }

    /// Mutable namespace registry.
    pub const fn namespaces_mut(&mut self) -> &mut NamespaceRegistry {
        &mut self.namespaces
    }

    /// Interns a namespace.
    pub fn intern_namespace(&mut self, uri: &str, kind: NamespaceKind) -> Namespace {
        self.namespaces.intern(uri, kind)
    }

    /// The public namespace.
    pub fn public_namespace(&mut self) -> Namespace {
        self.namespaces.intern(PUBLIC_TEXT, NamespaceKind::Public)
    }

    /// The namespace matching any qualifier.
    pub fn any_namespace(&mut self) -> Namespace {
        self.namespaces.intern(ANY_TEXT, NamespaceKind::Public)
    }

    /// The `AS3` namespace, which is the public namespace.
    pub fn as3_namespace(&mut self) -> Namespace {
        self.public_namespace()
    }

    /// `base$N`, unique within this context.
    pub fn unique_namespace_name(&mut self, base: &str) -> String {
        let name = format!("{base}${}", self.ticket);
        self.ticket += 1;
        name
    }

    /// Qualified name of a definition in `region` qualified by `qualifier`.
    ///
    /// The namespace text is the region followed by the qualifier's text,
    /// under the qualifier's kind. Accessors carry `/get` or `/set` in the
    /// local name.
    pub fn compute_qualified_name(
        &mut self,
        region: &str,
        name: &str,
        qualifier: &Namespace,
        kind: NameKind,
    ) -> QName {
        let ns = if region.is_empty() {
            self.namespaces.intern(qualifier.text(), qualifier.kind())
        } else {
            let text = format!("{region}{}", qualifier.text());
            self.namespaces.intern(&text, qualifier.kind())
        };
        QName::new(ns, format!("{name}{}", kind.suffix()))
    }

    /// Printable `region/ns2|ns1:name/get` form of a definition.
    ///
    /// Namespaces are listed last to first. Empty namespace texts add no
    /// delimiter.
    #[must_use]
    pub fn debug_name(
        region: &str,
        name: &str,
        namespaces: &[Namespace],
        kind: NameKind,
    ) -> String {
        let mut out = String::with_capacity(region.len() + name.len() + namespaces.len() * 8);
        out.push_str(region);
        if !region.is_empty() {
            out.push('/');
        }
        let prefix = out.len();
        let last = namespaces.len().saturating_sub(1);
        for (n, ns) in namespaces.iter().enumerate().rev() {
            if !ns.text().is_empty() && n != last {
                out.push('|');
            }
            out.push_str(ns.text());
        }
        if out.len() > prefix {
            out.push(':');
        }
        out.push_str(name);
        out.push_str(kind.suffix());
        out
    }

    // -------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------

    /// Type registry.
    #[must_use]
    pub const fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Mutable type registry.
    pub const fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    /// A builtin type, created on first use.
    pub fn builtin(&mut self, builtin: Builtin) -> TypeId {
        self.types.builtin(&mut self.namespaces, builtin)
    }

    /// Default type info of a builtin.
    pub fn builtin_info(&mut self, builtin: Builtin) -> TypeInfo {
        let id = self.builtin(builtin);
        self.types.default_type_info(id)
    }

    /// The `*` type.
    pub fn any_type(&mut self) -> TypeId {
        self.builtin(Builtin::Any)
    }

    /// The `Object` type.
    pub fn object_type(&mut self) -> TypeId {
        self.builtin(Builtin::Object)
    }

    /// The `void` type.
    pub fn void_type(&mut self) -> TypeId {
        self.builtin(Builtin::Void)
    }

    /// The type of `null`.
    pub fn null_type(&mut self) -> TypeId {
        self.builtin(Builtin::Null)
    }

    /// Defines or re-initializes a user type.
    pub fn define_type_value(&mut self, qname: QName, family: asc_core::TypeFamily) -> TypeId {
        self.types
            .define_type_value(&mut self.namespaces, qname, family)
    }

    /// Type named `qname`, created unresolved if unknown.
    pub fn type_value(&mut self, qname: QName) -> TypeId {
        self.types.type_value(&mut self.namespaces, qname)
    }

    /// `Vector.<element>`.
    pub fn vector_of(&mut self, element: TypeId) -> TypeId {
        self.types.instantiate_vector(&mut self.namespaces, element)
    }

    /// Applies a type argument to a parameterized type.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticsError::NotParameterized`] if `generic` takes no
    /// type arguments.
    pub fn apply_type(&mut self, generic: TypeId, element: TypeId) -> Result<TypeId, SemanticsError> {
        self.types
            .apply_type(&mut self.namespaces, generic, element)
    }

    // -------------------------------------------------------------------
    // Slots
    // -------------------------------------------------------------------

    /// Slot id counter.
    pub const fn slot_ids(&mut self) -> &mut SlotIdAllocator {
        &mut self.slot_ids
    }

    /// Allocates a variable slot in `scope`.
    pub fn add_variable_slot(&mut self, scope: ScopeId, ty: Option<TypeInfo>) -> SlotId {
        self.scopes
            .get_mut(scope)
            .add_variable_slot(&mut self.slot_ids, ty, scope)
    }

    /// Allocates a method slot in `scope`.
    pub fn add_method_slot(
        &mut self,
        scope: ScopeId,
        ty: Option<TypeInfo>,
        method_id: u32,
    ) -> SlotId {
        self.scopes
            .get_mut(scope)
            .add_method_slot(&mut self.slot_ids, ty, method_id, scope)
    }

    /// Slot `id` as seen from `scope`.
    #[must_use]
    pub fn slot(&self, scope: ScopeId, id: SlotId) -> Option<&Slot> {
        self.scopes.slot(scope, id)
    }

    /// Mutable slot `id` as seen from `scope`.
    pub fn slot_mut(&mut self, scope: ScopeId, id: SlotId) -> Option<&mut Slot> {
        self.scopes.slot_mut(scope, id)
    }

    // -------------------------------------------------------------------
    // Scopes
    // -------------------------------------------------------------------

    /// Scope arena.
    #[must_use]
    pub const fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Mutable scope arena.
    pub const fn scopes_mut(&mut self) -> &mut Scopes {
        &mut self.scopes
    }

    /// Adds a scope to the arena without pushing it.
    pub fn new_scope(&mut self, scope: Scope) -> ScopeId {
        self.scopes.alloc(scope)
    }

    /// Pushes `scope` as the innermost frame.
    pub fn push_scope(&mut self, scope: ScopeId) {
        self.chain.push(scope);
    }

    /// Pops the innermost frame.
    ///
    /// # Panics
    ///
    /// Panics if the chain is empty.
    pub fn pop_scope(&mut self) -> ScopeId {
        assert!(!self.chain.is_empty(), "popped an empty scope chain");
        self.chain.pop().unwrap_or(ScopeId::from_index(0))
    }

    /// Innermost frame.
    #[must_use]
    pub fn scope(&self) -> Option<ScopeId> {
        self.chain.last().copied()
    }

    /// Frame `n` counted from the outermost.
    #[must_use]
    pub fn scope_at(&self, n: usize) -> Option<ScopeId> {
        self.chain.get(n).copied()
    }

    /// Outermost frame.
    #[must_use]
    pub fn global_scope(&self) -> Option<ScopeId> {
        self.chain.first().copied()
    }

    /// Number of frames on the chain.
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.chain.len()
    }

    /// Frames from outermost to innermost.
    #[must_use]
    pub fn scope_chain(&self) -> &[ScopeId] {
        &self.chain
    }

    /// Replaces the chain, returning the previous one.
    pub fn swap_scope_chain(&mut self, chain: Vec<ScopeId>) -> Vec<ScopeId> {
        core::mem::replace(&mut self.chain, chain)
    }

    /// Frame of class `ty`, created on first use.
    ///
    /// The frame inherits the frame of the base class, and lookups through
    /// it translate the class's protected namespace to the base's.
    pub fn class_scope(&mut self, ty: TypeId) -> ScopeId {
        if let Some(scope) = self.types.get(ty).scope {
            return scope;
        }
        let base = self.types.get(ty).base.map(|b| self.class_scope(b));
        let value = self.types.get(ty);
        let mut scope = Scope::new(value.name.to_string());
        scope.ty = Some(ty);
        scope.protected_ns = Some(value.static_protected_ns.clone());
        scope.bases.extend(base);
        let id = self.scopes.alloc(scope);
        self.types.get_mut(ty).scope = Some(id);
        id
    }

    /// Pushes the frames of `ty` and its bases, root class first.
    pub fn push_class_scopes(&mut self, ty: TypeId) {
        let mut lineage: Vec<TypeId> = self.types.base_chain(ty).collect();
        lineage.reverse();
        for t in lineage {
            let scope = self.class_scope(t);
            self.push_scope(scope);
        }
    }

    /// Pops the frames pushed by [`push_class_scopes`](Self::push_class_scopes).
    pub fn pop_class_scopes(&mut self, ty: TypeId) {
        for _ in 0..self.types.base_chain(ty).count() {
            self.pop_scope();
        }
    }

    /// Resolves a reference against the scope chain, innermost frame first.
    ///
    /// The first frame in which any candidate namespace binds the name
    /// decides. Returns that frame and the slot, or `None` if no frame binds
    /// the name.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticsError::AmbiguousReference`], after reporting the
    /// diagnostic, if the deciding frame binds the name to different slots
    /// under different candidate namespaces, or if a getter or setter lookup
    /// also finds the opposite accessor under another candidate namespace.
    pub fn find_slot(
        &mut self,
        reference: &Reference,
    ) -> Result<Option<(ScopeId, SlotId)>, SemanticsError> {
        let chain = self.chain.clone();
        for &scope in chain.iter().rev() {
            let Some(found) = self.scopes.has_names(
                scope,
                reference.kind,
                &reference.name,
                &reference.namespaces,
            ) else {
                continue;
            };

            let slot = found[0].1;
            let clash = self.opposite_accessor(scope, reference, &found);
            if clash.is_some() || found.iter().any(|(_, s)| *s != slot) {
                let namespaces: Vec<String> = found
                    .iter()
                    .map(|(ns, _)| ns)
                    .chain(&clash)
                    .map(Namespace::debug_text)
                    .collect();
                self.error(
                    reference.position,
                    ErrorCode::AmbiguousReference,
                    &[&*reference.name],
                );
                return Err(SemanticsError::AmbiguousReference {
                    name: reference.name.to_string(),
                    namespaces,
                });
            }

            self.check_slot_version(scope, slot, reference);
            return Ok(Some((scope, slot)));
        }
        Ok(None)
    }

    /// For an accessor reference, a candidate namespace that binds only the
    /// opposite accessor. Such a pair is ambiguous at runtime. A lone
    /// protected match ignores opposite accessors in protected namespaces.
    fn opposite_accessor(
        &self,
        scope: ScopeId,
        reference: &Reference,
        found: &[(Namespace, SlotId)],
    ) -> Option<Namespace> {
        let opposite = reference.kind.opposite_accessor()?;
        let only_protected = found.len() == 1 && found[0].0.kind().is_protected();
        self.scopes
            .has_names(scope, opposite, &reference.name, &reference.namespaces)?
            .into_iter()
            .map(|(ns, _)| ns)
            .find(|ns| {
                !(only_protected && ns.kind().is_protected())
                    && !found.iter().any(|(f, _)| f == ns)
            })
    }

    fn check_slot_version(&mut self, scope: ScopeId, slot: SlotId, reference: &Reference) {
        let Some(current) = self.version() else {
            return;
        };
        let defined = self.scopes.slot(scope, slot).and_then(|s| s.version);
        if defined.is_some_and(|v| v > current) {
            self.error(reference.position, ErrorCode::WrongVersion, &[&*reference.name]);
        }
    }

    // -------------------------------------------------------------------
    // API versions
    // -------------------------------------------------------------------

    /// Enters code compiled against API version `version`.
    ///
    /// Ignored unless version checking is on.
    pub fn push_version(&mut self, version: u32) {
        if self.config.check_version {
            self.versions.push(version);
        }
    }

    /// Leaves the innermost API version.
    pub fn pop_version(&mut self) -> Option<u32> {
        if self.config.check_version {
            self.versions.pop()
        } else {
            None
        }
    }

    /// Innermost API version, if version checking is on and one was pushed.
    #[must_use]
    pub fn version(&self) -> Option<u32> {
        self.versions.last().copied()
    }

    // -------------------------------------------------------------------
    // Definitions
    // -------------------------------------------------------------------

    /// Declares `name` in `scope` under `ns`, bound to a new variable slot.
    ///
    /// Returns `None` if the name is already bound there.
    pub fn define_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        ns: &Namespace,
        ty: Option<TypeInfo>,
    ) -> Option<SlotId> {
        let name: Rc<str> = Rc::from(name);
        if self.scopes.get(scope).slot_index(NameKind::Var, &name, ns).is_some() {
            return None;
        }
        let slot = self.add_variable_slot(scope, ty);
        self.scopes
            .get_mut(scope)
            .define_name(NameKind::Var, &name, ns, slot);
        if let Some(version) = self.namespaces.version(ns.id())
            && let Some(s) = self.scopes.slot_mut(scope, slot)
        {
            s.version = Some(version);
        }
        Some(slot)
    }
}
