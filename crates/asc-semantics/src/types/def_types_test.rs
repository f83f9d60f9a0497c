// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the reaching-definition type merge.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use asc_core::BitVector;

use super::*;
use crate::config::CompilerConfig;
use crate::context::Context;

fn bits(positions: &[usize]) -> BitVector {
    positions.iter().copied().collect()
}

fn info(cx: &mut Context, builtin: Builtin) -> TypeInfo {
    cx.builtin_info(builtin)
}

#[test]
fn def_types_grow_on_demand() {
    let mut cx = Context::new(CompilerConfig::new());
    let int = info(&mut cx, Builtin::Int);
    cx.set_def_type(&bits(&[40]), int);
    assert_eq!(cx.def_types().len(), 41);
    assert_eq!(cx.def_types().get(40), Some(int));
    assert_eq!(cx.def_types().get(3), None);
}

#[test]
fn only_the_lowest_bit_is_recorded() {
    let mut cx = Context::new(CompilerConfig::new());
    let string = info(&mut cx, Builtin::String);
    cx.set_def_type(&bits(&[2, 5]), string);
    assert_eq!(cx.def_types().get(2), Some(string));
    assert_eq!(cx.def_types().get(5), None);
}

#[test]
fn empty_vector_records_nothing() {
    let mut cx = Context::new(CompilerConfig::new());
    let string = info(&mut cx, Builtin::String);
    cx.set_def_type(&BitVector::new(), string);
    assert!(cx.def_types().is_empty());
}

#[test]
fn last_write_wins() {
    let mut cx = Context::new(CompilerConfig::new());
    let int = info(&mut cx, Builtin::Int);
    let string = info(&mut cx, Builtin::String);
    cx.set_def_type(&bits(&[1]), int);
    cx.set_def_type(&bits(&[1]), string);
    assert_eq!(cx.get_def_type(&bits(&[1])), string);
}

#[test]
fn single_definition_yields_its_type() {
    let mut cx = Context::new(CompilerConfig::new());
    let int = info(&mut cx, Builtin::Int);
    cx.set_def_type(&bits(&[0]), int);
    assert_eq!(cx.get_def_type(&bits(&[0])), int);
}

#[test]
fn unrecorded_definition_yields_any() {
    let mut cx = Context::new(CompilerConfig::new());
    let any = info(&mut cx, Builtin::Any);
    let int = info(&mut cx, Builtin::Int);
    cx.set_def_type(&bits(&[0]), int);
    assert_eq!(cx.get_def_type(&bits(&[0, 1])), any);
    assert_eq!(cx.get_def_type(&bits(&[1, 0])), any);
    assert_eq!(cx.get_def_type(&bits(&[200])), any);
}

#[test]
fn empty_reach_yields_any() {
    let mut cx = Context::new(CompilerConfig::new());
    let any = info(&mut cx, Builtin::Any);
    assert_eq!(cx.get_def_type(&BitVector::new()), any);
}

#[test]
fn same_family_keeps_first_type() {
    let mut cx = Context::new(CompilerConfig::new());
    let int = info(&mut cx, Builtin::Int);
    cx.set_def_type(&bits(&[0]), int);
    cx.set_def_type(&bits(&[1]), int);
    assert_eq!(cx.get_def_type(&bits(&[0, 1])), int);
}

#[test]
fn disjoint_families_yield_any() {
    let mut cx = Context::new(CompilerConfig::new());
    let any = info(&mut cx, Builtin::Any);
    let int = info(&mut cx, Builtin::Int);
    let string = info(&mut cx, Builtin::String);
    cx.set_def_type(&bits(&[0]), int);
    cx.set_def_type(&bits(&[1]), string);
    assert_eq!(cx.get_def_type(&bits(&[0, 1])), any);
}

#[test]
fn void_definition_is_replaced_by_the_next() {
    let mut cx = Context::new(CompilerConfig::new());
    let void = info(&mut cx, Builtin::Void);
    let string = info(&mut cx, Builtin::String);
    cx.set_def_type(&bits(&[0]), void);
    cx.set_def_type(&bits(&[1]), string);
    assert_eq!(cx.get_def_type(&bits(&[0, 1])), string);
    assert_eq!(cx.get_def_type(&bits(&[0])), void);
}
