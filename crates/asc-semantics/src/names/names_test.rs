// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the symbol table.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use asc_core::NamespaceKind;
use proptest::prelude::*;

use super::*;
use crate::namespace::NamespaceRegistry;

fn setup() -> (NamespaceRegistry, Namespace, Namespace) {
    let mut reg = NamespaceRegistry::new();
    let public = reg.intern("", NamespaceKind::Public);
    let private = reg.intern("Foo", NamespaceKind::Private);
    (reg, public, private)
}

fn name(s: &str) -> Rc<str> {
    Rc::from(s)
}

#[test]
fn empty_table_reads_without_allocating() {
    let (_, public, _) = setup();
    let names = Names::EMPTY;
    assert!(names.lookup("x", &public, NameKind::Get).is_none());
    assert!(names.get("x", NameKind::Get).is_none());
    assert!(!names.contains_name("x", NameKind::Var));
    assert_eq!(names.iter().count(), 0);
    assert_eq!(names.bucket_count(), 0);
    assert_eq!(names.entry_capacity(), 0);
}

#[test]
fn put_then_lookup() {
    let (_, public, _) = setup();
    let mut names = Names::new();
    assert_eq!(names.put(&name("x"), &public, NameKind::Var, SlotId::new(5)), None);
    assert_eq!(names.lookup("x", &public, NameKind::Var), Some(SlotId::new(5)));
    assert!(names.contains("x", &public, NameKind::Var));
}

#[test]
fn other_namespace_misses() {
    let (_, public, private) = setup();
    let mut names = Names::new();
    names.put(&name("x"), &public, NameKind::Var, SlotId::new(5));
    assert_eq!(names.lookup("x", &private, NameKind::Var), None);
}

#[test]
fn variable_answers_get_and_set() {
    let (_, public, _) = setup();
    let mut names = Names::new();
    names.put(&name("v"), &public, NameKind::Var, SlotId::new(1));
    assert_eq!(names.lookup("v", &public, NameKind::Get), Some(SlotId::new(1)));
    assert_eq!(names.lookup("v", &public, NameKind::Set), Some(SlotId::new(1)));
    assert_eq!(names.lookup("v", &public, NameKind::Method), None);
}

#[test]
fn getter_and_setter_coexist() {
    let (_, public, _) = setup();
    let mut names = Names::new();
    names.put(&name("p"), &public, NameKind::Get, SlotId::new(1));
    names.put(&name("p"), &public, NameKind::Set, SlotId::new(2));
    assert_eq!(names.len(), 2);
    assert_eq!(names.lookup("p", &public, NameKind::Get), Some(SlotId::new(1)));
    assert_eq!(names.lookup("p", &public, NameKind::Set), Some(SlotId::new(2)));
}

#[test]
fn enter_starts_unbound() {
    let (_, public, _) = setup();
    let mut names = Names::new();
    let i = names.enter(&name("u"), &public, NameKind::Var);
    assert_eq!(names.entry(i).slot, SlotId::NULL);
    assert_eq!(names.lookup("u", &public, NameKind::Var), None);
    assert_eq!(names.enter(&name("u"), &public, NameKind::Var), i);
    assert_eq!(names.iter().count(), 0);
}

#[test]
fn put_returns_previous_slot() {
    let (_, public, _) = setup();
    let mut names = Names::new();
    names.put(&name("x"), &public, NameKind::Var, SlotId::new(1));
    assert_eq!(
        names.put(&name("x"), &public, NameKind::Var, SlotId::new(2)),
        Some(SlotId::new(1))
    );
    assert_eq!(names.len(), 1);
}

#[test]
fn get_collects_all_namespaces() {
    let (_, public, private) = setup();
    let mut names = Names::new();
    names.put(&name("x"), &private, NameKind::Var, SlotId::new(2));
    names.put(&name("x"), &public, NameKind::Var, SlotId::new(1));
    names.put(&name("y"), &public, NameKind::Var, SlotId::new(3));

    let q = names.get("x", NameKind::Get).unwrap();
    assert_eq!(q.len(), 2);
    assert_eq!(q.get(&public), Some(SlotId::new(1)));
    assert_eq!(q.get(&private), Some(SlotId::new(2)));
    assert!(names.get("x", NameKind::Method).is_none());
}

#[test]
fn unbind_hides_entry() {
    let (_, public, _) = setup();
    let mut names = Names::new();
    names.put(&name("x"), &public, NameKind::Var, SlotId::new(1));
    assert_eq!(names.unbind("x", &public, NameKind::Var), Some(SlotId::new(1)));
    assert!(!names.contains("x", &public, NameKind::Var));
    assert_eq!(names.unbind("x", &public, NameKind::Var), None);
    assert_eq!(names.len(), 1);
}

#[test]
fn rehash_at_load_factor() {
    let (_, public, _) = setup();
    let mut names = Names::new();
    names.put(&name("a"), &public, NameKind::Var, SlotId::new(1));
    assert_eq!(names.bucket_count(), 8);
    // 5 * (count + 1) >= 4 * 8 triggers on the 7th insert.
    for (i, n) in ["b", "c", "d", "e", "f"].iter().enumerate() {
        names.put(&name(n), &public, NameKind::Var, SlotId::new(i as u32 + 2));
    }
    assert_eq!(names.bucket_count(), 8);
    names.put(&name("g"), &public, NameKind::Var, SlotId::new(7));
    assert_eq!(names.bucket_count(), 16);
}

#[test]
fn entry_arrays_grow_linearly_past_limit() {
    let (_, public, _) = setup();
    let mut names = Names::new();
    for i in 0..300u32 {
        names.put(&name(&format!("n{i}")), &public, NameKind::Var, SlotId::new(i + 1));
    }
    assert_eq!(names.entry_capacity(), 512);
}

#[test]
fn put_all_preserves_slots() {
    let (_, public, private) = setup();
    let mut base = Names::new();
    base.put(&name("x"), &public, NameKind::Var, SlotId::new(10));
    base.put(&name("y"), &private, NameKind::Method, SlotId::new(11));
    base.enter(&name("z"), &public, NameKind::Var);

    let mut derived = Names::new();
    derived.put_all(&base);
    assert_eq!(derived.len(), 2);
    assert_eq!(derived.lookup("x", &public, NameKind::Var), Some(SlotId::new(10)));
    assert_eq!(derived.lookup("y", &private, NameKind::Method), Some(SlotId::new(11)));
}

#[test]
fn rename_namespace_moves_entries() {
    let (mut reg, public, _) = setup();
    let placeholder = reg.create_placeholder("__unresolved__ns__0");
    let real = reg.intern("mx_internal", NamespaceKind::Explicit);
    let mut names = Names::new();
    names.put(&name("x"), &placeholder, NameKind::Var, SlotId::new(1));
    names.put(&name("y"), &public, NameKind::Var, SlotId::new(2));

    assert_eq!(names.rename_namespace(placeholder.id(), &real), 1);
    assert_eq!(names.lookup("x", &real, NameKind::Var), Some(SlotId::new(1)));
    assert_eq!(names.lookup("x", &placeholder, NameKind::Var), None);
}

#[test]
fn rename_onto_existing_binding_keeps_one_entry() {
    let (mut reg, _, _) = setup();
    let placeholder = reg.create_placeholder("__unresolved__ns__0");
    let real = reg.intern("mx_internal", NamespaceKind::Explicit);
    let mut names = Names::new();
    names.put(&name("x"), &placeholder, NameKind::Var, SlotId::new(1));
    names.put(&name("x"), &real, NameKind::Var, SlotId::new(2));

    assert_eq!(names.rename_namespace(placeholder.id(), &real), 1);
    let bound: Vec<_> = names
        .iter()
        .filter(|e| &**e.name == "x" && e.namespace.id() == real.id())
        .map(|e| e.slot)
        .collect();
    assert_eq!(bound, vec![SlotId::new(2)]);

    assert_eq!(names.unbind("x", &real, NameKind::Var), Some(SlotId::new(2)));
    assert_eq!(names.lookup("x", &real, NameKind::Var), None);
    assert_eq!(names.lookup("x", &placeholder, NameKind::Var), None);
}

#[test]
fn rename_fills_unbound_entry() {
    let (mut reg, _, _) = setup();
    let placeholder = reg.create_placeholder("__unresolved__ns__0");
    let real = reg.intern("mx_internal", NamespaceKind::Explicit);
    let mut names = Names::new();
    names.enter(&name("x"), &real, NameKind::Var);
    names.put(&name("x"), &placeholder, NameKind::Var, SlotId::new(1));

    names.rename_namespace(placeholder.id(), &real);
    assert_eq!(names.lookup("x", &real, NameKind::Var), Some(SlotId::new(1)));
    assert_eq!(names.iter().count(), 1);
}

#[test]
fn rename_to_same_namespace_is_a_no_op() {
    let (_, public, _) = setup();
    let mut names = Names::new();
    names.put(&name("x"), &public, NameKind::Var, SlotId::new(1));
    assert_eq!(names.rename_namespace(public.id(), &public), 0);
    assert_eq!(names.lookup("x", &public, NameKind::Var), Some(SlotId::new(1)));
}

#[test]
fn multinames_export_readable_bindings() {
    let (_, public, private) = setup();
    let mut names = Names::new();
    names.put(&name("x"), &public, NameKind::Var, SlotId::new(1));
    names.put(&name("x"), &private, NameKind::Var, SlotId::new(2));
    names.put(&name("w"), &public, NameKind::Set, SlotId::new(3));
    let m = names.multinames();
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("x").map(Qualifiers::len), Some(2));
}

#[test]
#[should_panic(expected = "outside table")]
fn entry_out_of_range_panics() {
    let names = Names::new();
    let _ = names.entry(0);
}

proptest! {
    #[test]
    fn inserted_triples_survive_growth(keys in prop::collection::hash_set("[a-z]{1,6}", 1..200)) {
        let (_, public, private) = setup();
        let mut names = Names::new();
        let keys: Vec<String> = keys.into_iter().collect();
        for (i, k) in keys.iter().enumerate() {
            let ns = if i % 2 == 0 { &public } else { &private };
            names.put(&Rc::from(k.as_str()), ns, NameKind::Var, SlotId::new(i as u32 + 1));
        }
        for (i, k) in keys.iter().enumerate() {
            let (ns, other) = if i % 2 == 0 { (&public, &private) } else { (&private, &public) };
            prop_assert_eq!(names.lookup(k, ns, NameKind::Var), Some(SlotId::new(i as u32 + 1)));
            prop_assert_eq!(names.lookup(k, other, NameKind::Var), None);
        }
        prop_assert!(5 * names.len() < 4 * names.bucket_count());
    }
}
