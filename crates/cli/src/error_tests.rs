// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[test]
fn test_not_found_display() {
    let err = Error::NotFound {
        kind: EntityKind::Issue,
        target: "7/42".to_string(),
    };
    assert_eq!(err.to_string(), "issue not found: 7/42");
    assert!(err.is_not_found());
}

#[test]
fn test_addressing_has_hint() {
    let err = Error::Addressing {
        kind: EntityKind::Comment,
        reason: "no issue matched".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("cannot address comment"));
    assert!(msg.contains("hint:"));
}

#[test]
fn test_unsupported_display() {
    let err = Error::Unsupported {
        backend: "github",
        kind: EntityKind::Account,
        operation: "create",
    };
    assert_eq!(err.to_string(), "the github backend cannot create account entities");
}

#[test]
fn test_unchanged_display() {
    let err = Error::Unchanged {
        kind: EntityKind::Issue,
        target: "7/42".to_string(),
    };
    assert!(err.to_string().contains("unchanged"));
}

#[test]
fn test_from_transport_error() {
    let err: Error = TransportError::Connection("refused".to_string()).into();
    assert!(matches!(err, Error::Transport(_)));
    assert!(err.to_string().contains("refused"));
}

#[parameterized(
    unknown_type = { ts_core::Error::UnknownType("widget".into()), "unknown entity type" },
    addressing = { ts_core::Error::Addressing { kind: EntityKind::Issue, reason: "x".into() }, "cannot address issue" },
    validation = { ts_core::Error::Validation { kind: EntityKind::Project, field: "key" }, "missing required field 'key'" },
    conversion = { ts_core::Error::Conversion(ConversionError::missing(EntityKind::Label, "name")), "key 'name' is missing" },
    mismatch = { ts_core::Error::KindMismatch { expected: EntityKind::Issue, found: EntityKind::Label }, "expected a issue" },
    global_id = { ts_core::Error::InvalidGlobalId { input: "x".into(), reason: "bad".into() }, "invalid global id" },
)]
fn test_from_core_error(core: ts_core::Error, expected: &str) {
    let err: Error = core.into();
    assert!(err.to_string().contains(expected), "{}", err);
}
