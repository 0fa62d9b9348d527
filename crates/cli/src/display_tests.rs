// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use ts_core::{EntityId, Issue, IssueState, Label};

fn issue() -> Entity {
    Entity::Issue(Issue::new(EntityId::Num(7), "Crash on start").with_id(EntityId::Num(42)))
}

#[test]
fn test_wrap_text_short_unchanged() {
    assert_eq!(wrap_text("short text", 20), "short text");
}

#[test]
fn test_wrap_text_preserves_newlines() {
    let text = "line one\nline two that is rather long for the width";
    assert_eq!(wrap_text(text, 10), text);
}

#[test]
fn test_wrap_text_wraps_at_words() {
    assert_eq!(wrap_text("aaa bbb ccc ddd", 7), "aaa bbb\nccc ddd");
}

#[test]
fn test_format_entity_line() {
    assert_eq!(format_entity_line(&issue()), "- issue 7/42: Crash on start");
}

#[test]
fn test_format_entity_line_closed() {
    let Entity::Issue(open) = issue() else {
        panic!("Expected issue");
    };
    let closed = Entity::Issue(open.with_state(IssueState::Closed));
    assert!(format_entity_line(&closed).ends_with("(closed)"));
}

#[test]
fn test_format_entity_details_skips_blank_fields() {
    let label = Entity::Label(Label::new(EntityId::Num(7), "bug").with_color("#ff0000"));
    let details = format_entity_details(&label).unwrap();
    assert!(details.starts_with("label"));
    assert!(details.contains("Color: #ff0000"));
    assert!(details.contains("Project: 7"));
    assert!(!details.contains("Description"));
    assert!(!details.contains("Kind"));
}

#[test]
fn test_format_entity_details_description_block() {
    let Entity::Issue(mut raw) = issue() else {
        panic!("Expected issue");
    };
    raw.description = Some("It crashes.".to_string());
    let details = format_entity_details(&Entity::Issue(raw)).unwrap();
    assert!(details.contains("State: open"));
    assert!(details.contains("\nDescription:\n    It crashes."));
}

#[test]
fn test_field_label() {
    assert_eq!(field_label("due_date"), "Due date");
    assert_eq!(field_label("id"), "Id");
}
