// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for qualifiers and multinames.

use std::rc::Rc;

use asc_core::SlotId;

use super::*;

fn setup() -> (NamespaceRegistry, Namespace, Namespace) {
    let mut reg = NamespaceRegistry::new();
    let public = reg.intern("", NamespaceKind::Public);
    let internal = reg.intern("pkg", NamespaceKind::Internal);
    (reg, public, internal)
}

#[test]
fn qualifiers_are_ordered() {
    let (_, public, internal) = setup();
    let q: Qualifiers = [(internal.clone(), SlotId::new(2)), (public.clone(), SlotId::new(1))]
        .into_iter()
        .collect();
    let order: Vec<_> = q.namespaces().cloned().collect();
    assert_eq!(order, vec![public, internal]);
    assert_eq!(q.describe(), vec!["".to_string(), "pkg$internal".to_string()]);
}

#[test]
fn qualifiers_insert_and_remove() {
    let (_, public, _) = setup();
    let mut q = Qualifiers::new();
    assert_eq!(q.insert(public.clone(), SlotId::new(1)), None);
    assert_eq!(q.insert(public.clone(), SlotId::new(3)), Some(SlotId::new(1)));
    assert_eq!(q.get(&public), Some(SlotId::new(3)));
    assert_eq!(q.remove(&public), Some(SlotId::new(3)));
    assert!(q.is_empty());
}

#[test]
fn put_all_into_empty_aliases() {
    let (_, public, _) = setup();
    let mut base = Multinames::new();
    base.add(&Rc::from("x"), public.clone(), SlotId::new(4));

    let mut derived = Multinames::new();
    derived.put_all(&base);
    assert!(derived.is_borrowed());
    assert_eq!(derived.get("x").and_then(|q| q.get(&public)), Some(SlotId::new(4)));
    assert!(derived.is_borrowed());
    assert_eq!(derived, base);
}

#[test]
fn first_mutation_copies() {
    let (_, public, internal) = setup();
    let mut base = Multinames::new();
    base.add(&Rc::from("x"), public.clone(), SlotId::new(4));

    let mut derived = Multinames::new();
    derived.put_all(&base);
    derived.add(&Rc::from("y"), internal, SlotId::new(5));
    assert!(!derived.is_borrowed());
    assert_eq!(derived.len(), 2);
    assert_eq!(base.len(), 1);
}

#[test]
fn source_mutation_does_not_leak_into_alias() {
    let (_, public, _) = setup();
    let mut base = Multinames::new();
    base.add(&Rc::from("x"), public.clone(), SlotId::new(4));

    let mut derived = Multinames::new();
    derived.put_all(&base);
    base.remove("x");
    assert!(base.is_empty());
    assert_eq!(derived.len(), 1);
    assert!(derived.contains_key("x"));
}

#[test]
fn put_all_into_non_empty_merges() {
    let (_, public, internal) = setup();
    let mut a = Multinames::new();
    a.add(&Rc::from("x"), public.clone(), SlotId::new(1));
    let mut b = Multinames::new();
    b.add(&Rc::from("x"), internal.clone(), SlotId::new(2));
    b.add(&Rc::from("y"), public, SlotId::new(3));

    a.put_all(&b);
    assert!(!a.is_borrowed());
    assert_eq!(a.len(), 2);
    assert_eq!(a.get("x").map(Qualifiers::len), Some(2));
}

#[test]
fn put_all_of_empty_is_noop() {
    let mut a = Multinames::new();
    a.put_all(&Multinames::new());
    assert!(!a.is_borrowed());
    assert!(a.is_empty());
}

#[test]
fn put_replaces_and_remove_returns() {
    let (_, public, _) = setup();
    let mut m = Multinames::new();
    let q: Qualifiers = [(public, SlotId::new(9))].into_iter().collect();
    assert!(m.put(Rc::from("z"), q.clone()).is_none());
    assert_eq!(m.remove("z"), Some(q));
    assert_eq!(m.iter().count(), 0);
}
