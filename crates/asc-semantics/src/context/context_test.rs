// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the compilation context.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::rc::Rc;

use asc_core::{NameKind, NamespaceKind, TypeFamily};

use super::*;
use crate::diag::{InputBuffer, RecordingHandler};

fn recorded(config: CompilerConfig) -> (Context, RecordingHandler) {
    let recorder = RecordingHandler::new();
    let mut cx = Context::new(config);
    cx.set_handler(Box::new(recorder.clone()));
    (cx, recorder)
}

fn global(cx: &mut Context) -> ScopeId {
    let scope = cx.new_scope(Scope::new("global"));
    cx.push_scope(scope);
    scope
}

#[test]
fn unique_namespace_names_count_up() {
    let mut cx = Context::new(CompilerConfig::new());
    assert_eq!(cx.unique_namespace_name("Main.as"), "Main.as$0");
    assert_eq!(cx.unique_namespace_name("Main.as"), "Main.as$1");
    assert_eq!(cx.unique_namespace_name("Other.as"), "Other.as$2");
}

#[test]
fn well_known_namespaces() {
    let mut cx = Context::new(CompilerConfig::new());
    let public = cx.public_namespace();
    assert_eq!(public.text(), "");
    assert_eq!(cx.as3_namespace(), public);
    assert_eq!(cx.any_namespace().text(), "*");
    assert_ne!(cx.any_namespace(), public);
}

#[test]
fn qualified_names_combine_region_and_qualifier() {
    let mut cx = Context::new(CompilerConfig::new());
    let qualifier = cx.intern_namespace("Foo", NamespaceKind::Private);

    let plain = cx.compute_qualified_name("", "x", &qualifier, NameKind::Var);
    assert_eq!(plain.ns, qualifier);
    assert_eq!(&*plain.name, "x");

    let scoped = cx.compute_qualified_name("pkg.", "x", &qualifier, NameKind::Get);
    assert_eq!(scoped.ns.text(), "pkg.Foo");
    assert_eq!(scoped.ns.kind(), NamespaceKind::Private);
    assert_eq!(&*scoped.name, "x/get");
}

#[test]
fn debug_names() {
    let mut cx = Context::new(CompilerConfig::new());
    let public = cx.public_namespace();
    let a = cx.intern_namespace("a", NamespaceKind::Explicit);
    let b = cx.intern_namespace("b", NamespaceKind::Explicit);

    assert_eq!(Context::debug_name("", "x", &[], NameKind::Var), "x");
    assert_eq!(Context::debug_name("r", "x", &[], NameKind::Set), "r/x/set");
    assert_eq!(
        Context::debug_name("", "x", &[a.clone(), b.clone()], NameKind::Var),
        "b|a:x"
    );
    assert_eq!(
        Context::debug_name("r", "x", &[public.clone(), a], NameKind::Get),
        "r/a:x/get"
    );
    assert_eq!(Context::debug_name("", "x", &[b, public], NameKind::Var), "|b:x");
}

#[test]
fn diagnostics_are_counted() {
    let (mut cx, recorder) = recorded(CompilerConfig::new());
    cx.error(0, ErrorCode::UnknownNamespace, &[]);
    cx.warning(0, ErrorCode::UnknownNamespace, &[]);
    cx.internal_error(0, "broken invariant");
    assert_eq!(cx.error_count(), 2);
    assert_eq!(cx.warning_count(), 1);
    let all = recorder.diagnostics();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].message, "broken invariant");
    assert_eq!(all[1].severity, Severity::Warning);
}

#[test]
fn diagnostics_carry_frame_positions() {
    let (mut cx, recorder) = recorded(CompilerConfig::new());
    let input = Rc::new(InputBuffer::new("Main.as", "var a;\nvar b;"));
    cx.with_frame(SourceFrame::for_input(input), |cx| {
        cx.error(11, ErrorCode::UnknownNamespace, &[]);
    });
    assert_eq!(cx.frame().origin, "");

    let all = recorder.diagnostics();
    let d = &all[0];
    assert_eq!(d.origin, "Main.as");
    assert_eq!(d.line, Some(2));
    assert_eq!(d.source_line, "var b;");
}

#[test]
fn switch_to_frame_returns_previous() {
    let mut cx = Context::new(CompilerConfig::new());
    let old = cx.switch_to_frame(SourceFrame::for_origin("A.as"));
    assert_eq!(old.origin, "");
    let old = cx.switch_to_frame(SourceFrame::for_origin("B.as"));
    assert_eq!(old.origin, "A.as");
}

#[test]
fn import_notifications_reach_the_handler() {
    let (mut cx, recorder) = recorded(CompilerConfig::new());
    cx.import_file("lib.swc");
    assert_eq!(recorder.imports(), vec!["lib.swc".to_string()]);
}

#[test]
fn scope_chain_navigation() {
    let mut cx = Context::new(CompilerConfig::new());
    let outer = global(&mut cx);
    let inner = cx.new_scope(Scope::new("f"));
    cx.push_scope(inner);
    assert_eq!(cx.scope(), Some(inner));
    assert_eq!(cx.global_scope(), Some(outer));
    assert_eq!(cx.scope_at(0), Some(outer));
    assert_eq!(cx.scope_depth(), 2);
    assert_eq!(cx.pop_scope(), inner);
    assert_eq!(cx.scope(), Some(outer));

    let saved = cx.swap_scope_chain(vec![inner]);
    assert_eq!(saved, vec![outer]);
    assert_eq!(cx.global_scope(), Some(inner));
}

#[test]
#[should_panic(expected = "empty scope chain")]
fn popping_empty_chain_panics() {
    let mut cx = Context::new(CompilerConfig::new());
    cx.pop_scope();
}

#[test]
fn class_scopes_push_root_first() {
    let mut cx = Context::new(CompilerConfig::new());
    let public = cx.public_namespace();
    let object = cx.object_type();
    let a = cx.define_type_value(QName::new(public.clone(), "A"), TypeFamily::OBJECT);
    cx.types_mut().get_mut(a).base = Some(object);
    let b = cx.define_type_value(QName::new(public, "B"), TypeFamily::OBJECT);
    cx.types_mut().get_mut(b).base = Some(a);

    global(&mut cx);
    cx.push_class_scopes(b);
    assert_eq!(cx.scope_depth(), 4);
    let object_scope = cx.class_scope(object);
    let b_scope = cx.class_scope(b);
    assert_eq!(cx.scope_at(1), Some(object_scope));
    assert_eq!(cx.scope(), Some(b_scope));
    let a_scope = cx.class_scope(a);
    assert_eq!(cx.scopes().get(b_scope).bases, vec![a_scope]);

    cx.pop_class_scopes(b);
    assert_eq!(cx.scope_depth(), 1);
}

#[test]
fn find_slot_prefers_innermost_scope() {
    let mut cx = Context::new(CompilerConfig::new());
    let public = cx.public_namespace();
    let outer = global(&mut cx);
    let outer_slot = cx.define_variable(outer, "x", &public, None).unwrap();
    let inner = cx.new_scope(Scope::new("f"));
    cx.push_scope(inner);

    let reference = Reference::new("x", vec![public.clone()], NameKind::Get, 0);
    assert_eq!(cx.find_slot(&reference), Ok(Some((outer, outer_slot))));

    let inner_slot = cx.define_variable(inner, "x", &public, None).unwrap();
    assert_eq!(cx.find_slot(&reference), Ok(Some((inner, inner_slot))));
    assert!(cx.define_variable(inner, "x", &public, None).is_none());
}

#[test]
fn find_slot_misses_quietly() {
    let (mut cx, recorder) = recorded(CompilerConfig::new());
    let public = cx.public_namespace();
    global(&mut cx);
    let reference = Reference::new("nope", vec![public], NameKind::Get, 0);
    assert_eq!(cx.find_slot(&reference), Ok(None));
    assert!(recorder.diagnostics().is_empty());
}

#[test]
fn ambiguous_reference_is_reported_and_returned() {
    let (mut cx, recorder) = recorded(CompilerConfig::new());
    let a = cx.intern_namespace("a", NamespaceKind::Explicit);
    let b = cx.intern_namespace("b", NamespaceKind::Explicit);
    let scope = global(&mut cx);
    cx.define_variable(scope, "x", &a, None).unwrap();
    cx.define_variable(scope, "x", &b, None).unwrap();

    let reference = Reference::new("x", vec![a, b], NameKind::Get, 3);
    let err = cx.find_slot(&reference).unwrap_err();
    assert_eq!(
        err,
        SemanticsError::AmbiguousReference {
            name: "x".to_string(),
            namespaces: vec!["a".to_string(), "b".to_string()],
        }
    );
    let reported = recorder.with_code(ErrorCode::AmbiguousReference);
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].message, "Ambiguous reference to x.");
}

#[test]
fn same_slot_under_two_namespaces_is_not_ambiguous() {
    let mut cx = Context::new(CompilerConfig::new());
    let a = cx.intern_namespace("a", NamespaceKind::Explicit);
    let b = cx.intern_namespace("b", NamespaceKind::Explicit);
    let scope = global(&mut cx);
    let slot = cx.add_variable_slot(scope, None);
    cx.scopes_mut()
        .get_mut(scope)
        .define_names(NameKind::Var, &Rc::from("x"), [&a, &b], slot);

    let reference = Reference::new("x", vec![a, b], NameKind::Get, 0);
    assert_eq!(cx.find_slot(&reference), Ok(Some((scope, slot))));
}

/// Binds a getter of `name` under `getter_ns` and a setter under
/// `setter_ns`, returning the two slots.
fn accessors(
    cx: &mut Context,
    scope: ScopeId,
    name: &str,
    getter_ns: &Namespace,
    setter_ns: &Namespace,
) -> (SlotId, SlotId) {
    let name: Rc<str> = Rc::from(name);
    let getter = cx.add_method_slot(scope, None, 1);
    let setter = cx.add_method_slot(scope, None, 2);
    let frame = cx.scopes_mut().get_mut(scope);
    assert!(frame.define_name(NameKind::Get, &name, getter_ns, getter));
    assert!(frame.define_name(NameKind::Set, &name, setter_ns, setter));
    (getter, setter)
}

#[test]
fn split_accessors_across_open_namespaces_are_ambiguous() {
    let (mut cx, recorder) = recorded(CompilerConfig::new());
    let a = cx.intern_namespace("a", NamespaceKind::Explicit);
    let b = cx.intern_namespace("b", NamespaceKind::Explicit);
    let scope = global(&mut cx);
    accessors(&mut cx, scope, "p", &a, &b);

    let read = Reference::new("p", vec![a.clone(), b.clone()], NameKind::Get, 4);
    assert_eq!(
        cx.find_slot(&read),
        Err(SemanticsError::AmbiguousReference {
            name: "p".to_string(),
            namespaces: vec!["a".to_string(), "b".to_string()],
        })
    );
    let write = Reference::new("p", vec![a, b], NameKind::Set, 9);
    assert!(cx.find_slot(&write).is_err());
    assert_eq!(recorder.with_code(ErrorCode::AmbiguousReference).len(), 2);
}

#[test]
fn accessor_pair_in_one_namespace_is_not_ambiguous() {
    let (mut cx, recorder) = recorded(CompilerConfig::new());
    let a = cx.intern_namespace("a", NamespaceKind::Explicit);
    let b = cx.intern_namespace("b", NamespaceKind::Explicit);
    let scope = global(&mut cx);
    let (getter, setter) = accessors(&mut cx, scope, "p", &a, &a);

    let read = Reference::new("p", vec![a.clone(), b.clone()], NameKind::Get, 0);
    assert_eq!(cx.find_slot(&read), Ok(Some((scope, getter))));
    let write = Reference::new("p", vec![a, b], NameKind::Set, 0);
    assert_eq!(cx.find_slot(&write), Ok(Some((scope, setter))));
    assert!(recorder.diagnostics().is_empty());
}

#[test]
fn protected_opposite_accessor_is_ignored_for_protected_match() {
    let (mut cx, recorder) = recorded(CompilerConfig::new());
    let own = cx.intern_namespace("Derived", NamespaceKind::Protected);
    let inherited = cx.intern_namespace("Base", NamespaceKind::Protected);
    let scope = global(&mut cx);
    let (getter, _) = accessors(&mut cx, scope, "p", &own, &inherited);

    let read = Reference::new("p", vec![own, inherited], NameKind::Get, 0);
    assert_eq!(cx.find_slot(&read), Ok(Some((scope, getter))));
    assert!(recorder.diagnostics().is_empty());
}

#[test]
fn versions_are_tracked_only_when_checking() {
    let mut cx = Context::new(CompilerConfig::new());
    cx.push_version(660);
    assert_eq!(cx.version(), None);
    assert_eq!(cx.pop_version(), None);

    let mut cx = Context::new(CompilerConfig::new().with_check_version(true));
    cx.push_version(660);
    cx.push_version(661);
    assert_eq!(cx.version(), Some(661));
    assert_eq!(cx.pop_version(), Some(661));
    assert_eq!(cx.version(), Some(660));
}

#[test]
fn newer_definitions_are_reported_under_older_versions() {
    let (mut cx, recorder) = recorded(CompilerConfig::new().with_check_version(true));
    let public = cx.public_namespace();
    let scope = global(&mut cx);
    let slot = cx.define_variable(scope, "x", &public, None).unwrap();
    cx.slot_mut(scope, slot).unwrap().version = Some(662);

    let reference = Reference::new("x", vec![public], NameKind::Get, 0);
    cx.push_version(662);
    cx.find_slot(&reference).unwrap();
    assert!(recorder.diagnostics().is_empty());

    cx.push_version(660);
    cx.find_slot(&reference).unwrap();
    assert_eq!(recorder.with_code(ErrorCode::WrongVersion).len(), 1);
}

#[test]
fn contexts_are_independent() {
    let mut first = Context::new(CompilerConfig::new());
    let mut second = Context::new(CompilerConfig::new().with_numerics(true));
    let number = first.builtin(Builtin::Number);
    assert_eq!(first.builtin(Builtin::Double), number);
    let number = second.builtin(Builtin::Number);
    assert_ne!(second.builtin(Builtin::Double), number);
    assert_eq!(first.unique_namespace_name("a"), "a$0");
    assert_eq!(second.unique_namespace_name("a"), "a$0");
}
