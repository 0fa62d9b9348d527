// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_create_requires_data() {
    assert!(parse(&["tsync", "create", "issue"]).is_err());
    let cli = parse(&["tsync", "create", "issue", "--data", r#"{"name":"Crash"}"#]).unwrap();
    match cli.command {
        Command::Create { kind, data } => {
            assert_eq!(kind, "issue");
            assert_eq!(data.data, r#"{"name":"Crash"}"#);
        }
        _ => panic!("Expected Create command"),
    }
}

#[test]
fn test_update() {
    let cli = parse(&["tsync", "update", "issue", "42", "-p", "7", "-d", "{}"]).unwrap();
    match cli.command {
        Command::Update {
            kind, id, parents, ..
        } => {
            assert_eq!(kind, "issue");
            assert_eq!(id, "42");
            assert_eq!(parents.parent, vec!["7"]);
        }
        _ => panic!("Expected Update command"),
    }
}

#[test]
fn test_delete() {
    let cli = parse(&["tsync", "delete", "label", "bug", "-p", "7"]).unwrap();
    assert!(matches!(cli.command, Command::Delete { .. }));
}
