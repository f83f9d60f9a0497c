// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for input buffers and source frames.

use std::rc::Rc;

use super::*;

#[test]
fn first_line_positions() {
    let input = InputBuffer::new("a.as", "var x;\nvar y;");
    assert_eq!(input.line(0), 1);
    assert_eq!(input.column(0), 1);
    assert_eq!(input.column(4), 5);
    assert_eq!(input.line_text(4), "var x;");
}

#[test]
fn second_line_positions() {
    let input = InputBuffer::new("a.as", "var x;\nvar y;");
    assert_eq!(input.line(7), 2);
    assert_eq!(input.column(7), 1);
    assert_eq!(input.column(11), 5);
    assert_eq!(input.line_text(11), "var y;");
}

#[test]
fn crlf_counts_as_one_break() {
    let input = InputBuffer::new("a.as", "a\r\nb\rc");
    assert_eq!(input.line(3), 2);
    assert_eq!(input.line_text(3), "b");
    assert_eq!(input.line(5), 3);
    assert_eq!(input.line_text(5), "c");
}

#[test]
fn unicode_line_separators() {
    let input = InputBuffer::new("a.as", "\u{e9}\u{2028}xy\u{2029}z");
    assert_eq!(input.line(2), 2);
    assert_eq!(input.column(3), 2);
    assert_eq!(input.line_text(3), "xy");
    assert_eq!(input.line(5), 3);
}

#[test]
fn line_text_stops_at_nul() {
    let input = InputBuffer::new("a.as", "abc\0def");
    assert_eq!(input.line_text(1), "abc");
}

#[test]
fn pointer_line() {
    assert_eq!(InputBuffer::line_pointer(1), "^");
    assert_eq!(InputBuffer::line_pointer(4), "...^");
    assert_eq!(InputBuffer::line_pointer(0), "^");
}

#[test]
fn frame_origin() {
    let frame = SourceFrame::for_input(Rc::new(InputBuffer::new("Main.as", "")));
    assert_eq!(frame.origin, "Main.as");
    assert_eq!(frame.qualified_origin(), "Main.as");

    let mut frame = SourceFrame::for_origin("Main.as");
    frame.qualified_origin = "/src/Main.as".to_string();
    assert_eq!(frame.qualified_origin(), "/src/Main.as");
    assert!(frame.input.is_none());
}
