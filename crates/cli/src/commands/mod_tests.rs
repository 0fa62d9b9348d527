// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::backend::Backend;
use crate::testing::{store, FakeTransport};
use crate::transport::Verb;
use serde_json::json;
use yare::parameterized;

#[test]
fn parse_data_accepts_object() {
    let value = parse_data(r#"{"name": "bug", "color": "red"}"#).unwrap();
    assert_eq!(value["name"], "bug");
}

#[parameterized(
    not_json = { "{name" },
    array = { "[1, 2]" },
    string = { "\"bug\"" },
)]
fn parse_data_rejects(input: &str) {
    match parse_data(input).unwrap_err() {
        Error::InvalidArgument { arg, .. } => assert_eq!(arg, "--data"),
        other => panic!("expected an invalid argument, got {:?}", other),
    }
}

#[test]
fn parse_kind_accepts_aliases() {
    assert_eq!(parse_kind("repos").unwrap(), EntityKind::Project);
    assert_eq!(parse_kind("Note").unwrap(), EntityKind::Comment);
    assert!(matches!(parse_kind("ticket"), Err(Error::UnknownType(_))));
}

#[test]
fn parse_ids_infers_form() {
    assert_eq!(
        parse_ids(&["7".to_string(), "acme/widgets".to_string()]),
        vec![EntityId::Num(7), EntityId::Key("acme/widgets".into())]
    );
}

fn issue_fake() -> FakeTransport {
    let fake = FakeTransport::new();
    fake.on(
        Verb::Get,
        "projects/7/issues/42",
        json!({ "iid": 42, "project_id": 7, "title": "Crash", "state": "opened" }),
    );
    fake
}

#[test]
fn lookup_by_id() {
    let fake = issue_fake();
    let store = store(Backend::Gitlab, &fake);
    let target = Lookup::Id {
        id: "42".into(),
        parents: vec!["7".into()],
    };
    let entity = lookup(&store, EntityKind::Issue, &target).unwrap();
    assert_eq!(entity.name(), Some("Crash"));
}

#[test]
fn lookup_by_global_id() {
    let fake = issue_fake();
    let store = store(Backend::Gitlab, &fake);
    let entity = lookup(&store, EntityKind::Issue, &Lookup::Global("7/42".into())).unwrap();
    assert_eq!(entity.global_id().unwrap().encode(), "7/42");
}

#[test]
fn lookup_bad_global_id() {
    let fake = FakeTransport::new();
    let store = store(Backend::Gitlab, &fake);
    let err = lookup(&store, EntityKind::Issue, &Lookup::Global("7/x".into())).unwrap_err();
    assert!(matches!(err, Error::InvalidGlobalId { .. }));
    assert!(fake.requests().is_empty());
}

#[test]
fn lookup_by_name() {
    let fake = FakeTransport::new();
    fake.on(Verb::Get, "projects", json!([{ "id": 7, "name": "widgets" }]));
    let store = store(Backend::Gitlab, &fake);
    let target = Lookup::Name {
        name: "widgets".into(),
        parents: vec![],
    };
    let entity = lookup(&store, EntityKind::Project, &target).unwrap();
    assert_eq!(entity.id(), Some(&EntityId::Num(7)));
}

#[test]
fn print_entity_json_is_one_line() {
    let fake = issue_fake();
    let store = store(Backend::Gitlab, &fake);
    let entity = store
        .get(EntityKind::Issue, &EntityId::Num(42), &[EntityId::Num(7)])
        .unwrap();

    let mut out = Vec::new();
    print_entity(&mut out, &entity, OutputFormat::Json).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text.lines().count(), 1);
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["kind"], "issue");
    assert_eq!(value["name"], "Crash");
}
