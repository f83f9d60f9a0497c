// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Type arena, builtin types, and user-defined type names.

use std::rc::Rc;

use asc_core::{NamespaceKind, TypeFamily, TypeId};
use rustc_hash::FxHashMap;

use super::{QName, TypeInfo, TypeValue};
use crate::error::SemanticsError;
use crate::namespace::NamespaceRegistry;

/// Package holding `Vector` and its specializations.
pub const VECTOR_NAMESPACE: &str = "__AS3__.vec";

/// Types every compilation knows without a definition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Builtin {
    /// The untyped `*`.
    Any,
    /// `Object`.
    Object,
    /// `Array`.
    Array,
    /// `void`.
    Void,
    /// The type of `null`.
    Null,
    /// `Boolean`.
    Boolean,
    /// `String`.
    String,
    /// `Class`.
    Class,
    /// `Function`.
    Function,
    /// `int`.
    Int,
    /// `uint`.
    Uint,
    /// `Number`.
    Number,
    /// `double`; the same type as `Number` outside numerics mode.
    Double,
    /// `decimal`; the same type as `Number` outside numerics mode.
    Decimal,
    /// `XML`.
    Xml,
    /// `XMLList`.
    XmlList,
    /// `RegExp`.
    RegExp,
    /// The uninstantiated `Vector`.
    Vector,
    /// `Vector$object`, backing `Vector.<*>` and every object vector.
    VectorObject,
}

impl Builtin {
    /// Number of builtins.
    pub const COUNT: usize = 19;

    /// Every builtin.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Any,
        Self::Object,
        Self::Array,
        Self::Void,
        Self::Null,
        Self::Boolean,
        Self::String,
        Self::Class,
        Self::Function,
        Self::Int,
        Self::Uint,
        Self::Number,
        Self::Double,
        Self::Decimal,
        Self::Xml,
        Self::XmlList,
        Self::RegExp,
        Self::Vector,
        Self::VectorObject,
    ];

    /// Local name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "*",
            Self::Object => "Object",
            Self::Array => "Array",
            Self::Void => "void",
            Self::Null => "Null",
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::Class => "Class",
            Self::Function => "Function",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Number => "Number",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Xml => "XML",
            Self::XmlList => "XMLList",
            Self::RegExp => "RegExp",
            Self::Vector => "Vector",
            Self::VectorObject => "Vector$object",
        }
    }

    /// Family bits of the type.
    #[must_use]
    pub const fn family(self) -> TypeFamily {
        match self {
            Self::Any => TypeFamily::NONE,
            Self::Object | Self::RegExp | Self::Vector | Self::VectorObject => TypeFamily::OBJECT,
            Self::Array => TypeFamily::ARRAY,
            Self::Void => TypeFamily::VOID,
            Self::Null => TypeFamily::NULL,
            Self::Boolean => TypeFamily::BOOLEAN,
            Self::String => TypeFamily::STRING,
            Self::Class => TypeFamily::TYPE,
            Self::Function => TypeFamily::FUNCTION,
            Self::Int => TypeFamily::INT,
            Self::Uint => TypeFamily::UINT,
            Self::Number | Self::Double => TypeFamily::DOUBLE,
            Self::Decimal => TypeFamily::DECIMAL,
            Self::Xml | Self::XmlList => TypeFamily::XML,
        }
    }

    /// Namespace text and kind the type is declared in.
    const fn namespace(self) -> (&'static str, NamespaceKind) {
        match self {
            Self::Vector => (VECTOR_NAMESPACE, NamespaceKind::Public),
            Self::VectorObject => (VECTOR_NAMESPACE, NamespaceKind::Internal),
            _ => ("", NamespaceKind::Public),
        }
    }

    /// Returns true for the builtins that are roots of the class tree.
    const fn is_root(self) -> bool {
        matches!(self, Self::Any | Self::Object | Self::Void | Self::Null)
    }
}

/// Arena of every type in a compilation.
#[derive(Debug)]
pub struct TypeRegistry {
    types: Vec<TypeValue>,
    numerics: bool,
    builtins: [Option<TypeId>; Builtin::COUNT],
    /// Builtins by qualified name.
    builtin_names: FxHashMap<Rc<str>, TypeId>,
    /// User-defined types by qualified name.
    user_defined: FxHashMap<Rc<str>, TypeId>,
    /// `Vector.<T>` instantiations by element type.
    vectors: FxHashMap<TypeId, TypeId>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    ///
    /// `numerics` enables the distinct `double` and `decimal` builtins.
    #[must_use]
    pub fn new(numerics: bool) -> Self {
        Self {
            types: Vec::new(),
            numerics,
            builtins: [None; Builtin::COUNT],
            builtin_names: FxHashMap::default(),
            user_defined: FxHashMap::default(),
            vectors: FxHashMap::default(),
        }
    }

    /// Number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no type exists yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The type with the given id.
    #[must_use]
    pub fn get(&self, id: TypeId) -> &TypeValue {
        &self.types[id.index()]
    }

    /// Mutable access to the type with the given id.
    pub fn get_mut(&mut self, id: TypeId) -> &mut TypeValue {
        &mut self.types[id.index()]
    }

    /// Qualified name of a type, as printed in diagnostics.
    #[must_use]
    pub fn name(&self, id: TypeId) -> String {
        self.get(id).name.to_string()
    }

    /// The type's own type info: default nullability, not explicit.
    #[must_use]
    pub fn default_type_info(&self, id: TypeId) -> TypeInfo {
        TypeInfo::new(id, self.get(id).is_nullable, false)
    }

    /// Explicitly annotated type info.
    #[must_use]
    pub const fn type_info(id: TypeId, nullable: bool) -> TypeInfo {
        TypeInfo::new(id, nullable, true)
    }

    /// Adds a type named `qname`, with its protected namespaces.
    fn create(&mut self, namespaces: &mut NamespaceRegistry, qname: QName, family: TypeFamily) -> TypeId {
        let qualified = qname.to_string();
        let protected_ns = namespaces.intern(&qualified, NamespaceKind::Protected);
        let static_protected_ns = namespaces.intern(&qualified, NamespaceKind::StaticProtected);
        let id = TypeId::from_index(self.types.len());
        self.types
            .push(TypeValue::new(qname, family, protected_ns, static_protected_ns));
        id
    }

    /// The builtin type, created on first use.
    ///
    /// Outside numerics mode `double` and `decimal` are `Number`.
    pub fn builtin(&mut self, namespaces: &mut NamespaceRegistry, builtin: Builtin) -> TypeId {
        let builtin = match builtin {
            Builtin::Double | Builtin::Decimal if !self.numerics => Builtin::Number,
            other => other,
        };
        if let Some(id) = self.builtins[builtin as usize] {
            return id;
        }

        let base = (!builtin.is_root()).then(|| self.builtin(namespaces, Builtin::Object));
        let (ns_text, ns_kind) = builtin.namespace();
        let ns = namespaces.intern(ns_text, ns_kind);
        let qname = QName::new(ns, builtin.name());
        let key: Rc<str> = Rc::from(qname.to_string());
        let id = self.create(namespaces, qname, builtin.family());

        let ty = self.get_mut(id);
        ty.base = base;
        match builtin {
            Builtin::Any => ty.is_dynamic = true,
            Builtin::Vector => ty.is_parameterized = true,
            _ => {}
        }

        self.builtins[builtin as usize] = Some(id);
        self.builtin_names.insert(key, id);
        id
    }

    /// Returns true if `id` is the given builtin (respecting fallbacks).
    #[must_use]
    pub fn is(&self, id: TypeId, builtin: Builtin) -> bool {
        let builtin = match builtin {
            Builtin::Double | Builtin::Decimal if !self.numerics => Builtin::Number,
            other => other,
        };
        self.builtins[builtin as usize] == Some(id)
    }

    /// Returns true if a builtin with this qualified name was created.
    #[must_use]
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtin_names.contains_key(name)
    }

    /// Builtin with this qualified name, if it was created.
    #[must_use]
    pub fn builtin_named(&self, name: &str) -> Option<TypeId> {
        self.builtin_names.get(name).copied()
    }

    /// Defines a user type, or re-initializes an existing definition.
    ///
    /// A type already registered under the same qualified name keeps its id
    /// and is reset to a fresh, resolved definition.
    pub fn define_type_value(
        &mut self,
        namespaces: &mut NamespaceRegistry,
        qname: QName,
        family: TypeFamily,
    ) -> TypeId {
        let key = qname.to_string();
        if let Some(&id) = self.user_defined.get(key.as_str()) {
            let old = self.get(id);
            let mut fresh = TypeValue::new(
                qname,
                family,
                old.protected_ns.clone(),
                old.static_protected_ns.clone(),
            );
            fresh.scope = old.scope;
            *self.get_mut(id) = fresh;
            tracing::debug!(name = key, "re-initialized type definition");
            return id;
        }
        let id = self.create(namespaces, qname, family);
        self.user_defined.insert(Rc::from(key), id);
        id
    }

    /// The type named `qname`, creating an unresolved placeholder if unknown.
    pub fn type_value(&mut self, namespaces: &mut NamespaceRegistry, qname: QName) -> TypeId {
        let key = qname.to_string();
        if let Some(id) = self.user_defined(&key).or_else(|| self.builtin_named(&key)) {
            return id;
        }
        let id = self.create(namespaces, qname, TypeFamily::OBJECT);
        self.get_mut(id).resolved = false;
        self.user_defined.insert(Rc::from(key), id);
        id
    }

    /// Registers `id` under `name`, replacing an existing mapping.
    ///
    /// Replacing a mapping to a different type is logged, not rejected.
    pub fn set_user_defined(&mut self, name: &str, id: TypeId) {
        if let Some(old) = self.user_defined.insert(Rc::from(name), id)
            && old != id
        {
            tracing::warn!(name, old = old.as_u32(), new = id.as_u32(), "type redefined");
        }
    }

    /// User type registered under `name`.
    #[must_use]
    pub fn user_defined(&self, name: &str) -> Option<TypeId> {
        self.user_defined.get(name).copied()
    }

    /// Unregisters `name`.
    pub fn remove_user_defined(&mut self, name: &str) -> Option<TypeId> {
        self.user_defined.remove(name)
    }

    /// Instantiates `Vector.<element>`, cached per element type.
    ///
    /// `Vector.<*>` is `Vector$object` itself. Every other instantiation
    /// derives from `Vector$object`.
    pub fn instantiate_vector(
        &mut self,
        namespaces: &mut NamespaceRegistry,
        element: TypeId,
    ) -> TypeId {
        let vector_object = self.builtin(namespaces, Builtin::VectorObject);
        if self.is(element, Builtin::Any) {
            return vector_object;
        }
        if let Some(&id) = self.vectors.get(&element) {
            return id;
        }

        let vector = self.builtin(namespaces, Builtin::Vector);
        let is_final = self.get(vector).is_final;
        let ns = namespaces.intern(VECTOR_NAMESPACE, NamespaceKind::Public);
        let local = format!("Vector.<{}>", self.name(element));
        let id = self.create(namespaces, QName::new(ns, local), TypeFamily::OBJECT);
        let ty = self.get_mut(id);
        ty.base = Some(vector_object);
        ty.indexed_type = Some(element);
        ty.is_final = is_final;
        self.vectors.insert(element, id);
        id
    }

    /// Applies type arguments to a parameterized type.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticsError::NotParameterized`] if `generic` takes no
    /// type arguments.
    pub fn apply_type(
        &mut self,
        namespaces: &mut NamespaceRegistry,
        generic: TypeId,
        element: TypeId,
    ) -> Result<TypeId, SemanticsError> {
        if !self.get(generic).is_parameterized {
            return Err(SemanticsError::NotParameterized(self.name(generic)));
        }
        Ok(self.instantiate_vector(namespaces, element))
    }

    /// Returns true for `int`, `uint`, `Number`, `double`, and `decimal` in
    /// numerics mode.
    #[must_use]
    pub fn is_numeric(&self, id: TypeId) -> bool {
        [Builtin::Int, Builtin::Uint, Builtin::Number, Builtin::Double]
            .into_iter()
            .any(|b| self.is(id, b))
            || (self.numerics && self.is(id, Builtin::Decimal))
    }

    /// Returns true if values of type `other` are values of type `ty`.
    ///
    /// `*` includes everything. A class includes itself and its subclasses;
    /// an interface includes every type implementing it, directly or through
    /// a base class or an extended interface.
    #[must_use]
    pub fn includes(&self, ty: TypeId, other: TypeId) -> bool {
        if self.is(ty, Builtin::Any) {
            return true;
        }
        if self.get(ty).is_interface {
            self.implements(other, ty)
        } else {
            self.base_chain(other).any(|t| t == ty)
        }
    }

    /// Type info inclusion: the types include and a non-nullable type does
    /// not admit a nullable one.
    #[must_use]
    pub fn info_includes(&self, ty: TypeInfo, other: TypeInfo) -> bool {
        self.includes(ty.ty, other.ty) && (ty.nullable || !other.nullable)
    }

    /// `ty` followed by its base classes.
    pub fn base_chain(&self, ty: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        core::iter::successors(Some(ty), move |&t| self.get(t).base)
    }

    fn implements(&self, ty: TypeId, interface: TypeId) -> bool {
        let mut stack: Vec<TypeId> = self.base_chain(ty).collect();
        let mut seen = rustc_hash::FxHashSet::default();
        while let Some(t) = stack.pop() {
            if t == interface {
                return true;
            }
            if seen.insert(t) {
                stack.extend(self.get(t).interfaces.iter().copied());
            }
        }
        false
    }
}
