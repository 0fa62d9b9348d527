// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::backend::Backend;
use crate::error::Error;
use crate::testing::{store, FakeTransport};
use crate::transport::Verb;
use serde_json::json;

fn run(fake: &FakeTransport, kind: EntityKind, target: &Lookup, format: OutputFormat) -> Result<String> {
    let store = store(Backend::Gitlab, fake);
    let mut out = Vec::new();
    run_impl(&store, &mut out, kind, target, format)?;
    Ok(String::from_utf8(out).unwrap())
}

fn issue_target() -> Lookup {
    Lookup::Id {
        id: "42".into(),
        parents: vec!["7".into()],
    }
}

#[test]
fn prints_details() {
    let fake = FakeTransport::new();
    fake.on(
        Verb::Get,
        "projects/7/issues/42",
        json!({
            "iid": 42,
            "project_id": 7,
            "title": "Crash on start",
            "description": "Segfault in main",
            "state": "opened",
            "labels": ["bug"],
        }),
    );

    let text = run(&fake, EntityKind::Issue, &issue_target(), OutputFormat::Text).unwrap();

    assert!(text.starts_with("issue 7/42: Crash on start\n"));
    assert!(text.contains("Labels: bug"));
    assert!(text.contains("Description:\n    Segfault in main"));
}

#[test]
fn prints_json() {
    let fake = FakeTransport::new();
    fake.on(
        Verb::Get,
        "projects/7",
        json!({ "id": 7, "name": "widgets", "visibility": "public" }),
    );
    let target = Lookup::Id {
        id: "7".into(),
        parents: vec![],
    };

    let text = run(&fake, EntityKind::Project, &target, OutputFormat::Json).unwrap();

    let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(value["kind"], "project");
    assert_eq!(value["public"], true);
}

#[test]
fn missing_issue_is_not_found() {
    let fake = FakeTransport::new();
    let err = run(&fake, EntityKind::Issue, &issue_target(), OutputFormat::Text).unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: EntityKind::Issue, .. }));
}

#[test]
fn global_name_lookup() {
    let fake = FakeTransport::new();
    fake.on(Verb::Get, "projects", json!([{ "id": 7, "name": "widgets" }]));
    fake.on(
        Verb::Get,
        "projects/7/labels/bug",
        json!({ "id": 1, "name": "bug", "color": "#d9534f" }),
    );
    let target = Lookup::Name {
        name: "bug".into(),
        parents: vec!["widgets".into()],
    };

    let text = run(&fake, EntityKind::Label, &target, OutputFormat::Text).unwrap();

    assert!(text.starts_with("label 7/~bug: bug"));
    assert!(text.contains("Color: #d9534f"));
}
