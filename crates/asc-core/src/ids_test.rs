// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for ID types.

use super::*;

#[test]
fn slot_id_null() {
    assert!(SlotId::NULL.is_null());
    assert!(!SlotId::FIRST.is_null());
    assert_eq!(SlotId::default(), SlotId::NULL);
}

#[test]
fn slot_id_ordering() {
    let a = SlotId::new(3);
    assert_eq!(a.next(), SlotId::new(4));
    assert!(a < a.next());
    assert_eq!(a.as_u32(), 3);
}

#[test]
fn slot_id_formatting() {
    assert_eq!(format!("{:?}", SlotId::new(7)), "SlotId(7)");
    assert_eq!(format!("{}", SlotId::new(7)), "slot:7");
}

#[test]
fn arena_id_roundtrip() {
    let id = TypeId::from_index(12);
    assert_eq!(id.index(), 12);
    assert_eq!(id.as_u32(), 12);
}

#[test]
fn arena_id_formatting() {
    assert_eq!(format!("{:?}", NamespaceId::from_index(2)), "NamespaceId(2)");
    assert_eq!(format!("{}", NamespaceId::from_index(2)), "ns:2");
    assert_eq!(format!("{}", ScopeId::from_index(0)), "scope:0");
    assert_eq!(format!("{}", TypeId::from_index(5)), "type:5");
}
