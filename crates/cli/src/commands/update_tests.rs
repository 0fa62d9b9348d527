// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::backend::Backend;
use crate::testing::{store, FakeTransport};
use crate::transport::Verb;
use serde_json::json;

fn gl_issue(state: &str, title: &str) -> Value {
    json!({ "iid": 42, "project_id": 7, "title": title, "state": state, "labels": ["bug"] })
}

fn target() -> Lookup {
    Lookup::Id {
        id: "42".into(),
        parents: vec!["7".into()],
    }
}

#[test]
fn merge_overlays_top_level_keys() {
    let merged = merge(
        json!({ "name": "a", "labels": ["x"], "state": "open" }),
        json!({ "labels": [], "state": "closed" }),
    );
    assert_eq!(merged, json!({ "name": "a", "labels": [], "state": "closed" }));
}

#[test]
fn merge_non_object_replaces() {
    assert_eq!(merge(json!(1), json!({ "a": 1 })), json!({ "a": 1 }));
}

#[test]
fn closes_issue() {
    let fake = FakeTransport::new();
    fake.on(Verb::Get, "projects/7/issues/42", gl_issue("opened", "Crash"));
    fake.on(Verb::Put, "projects/7/issues/42", gl_issue("closed", "Crash"));
    let store = store(Backend::Gitlab, &fake);
    let mut out = Vec::new();

    run_impl(
        &store,
        &mut out,
        EntityKind::Issue,
        &target(),
        json!({ "state": "closed" }),
        OutputFormat::Text,
    )
    .unwrap();

    let body = fake.last(Verb::Put, "projects/7/issues/42").unwrap().body.unwrap();
    assert_eq!(body["state_event"], "close");
    assert_eq!(body["labels"], "bug");
    assert!(String::from_utf8(out).unwrap().contains("State: closed"));
}

#[test]
fn renames_issue() {
    let fake = FakeTransport::new();
    fake.on(Verb::Get, "projects/7/issues/42", gl_issue("opened", "Crash"));
    fake.on(Verb::Put, "projects/7/issues/42", gl_issue("opened", "Crash on start"));
    let store = store(Backend::Gitlab, &fake);
    let mut out = Vec::new();

    run_impl(
        &store,
        &mut out,
        EntityKind::Issue,
        &target(),
        json!({ "name": "Crash on start" }),
        OutputFormat::Json,
    )
    .unwrap();

    let body = fake.last(Verb::Put, "projects/7/issues/42").unwrap().body.unwrap();
    assert_eq!(body["title"], "Crash on start");
    assert!(body.get("state_event").is_none());
    let value: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["name"], "Crash on start");
}
