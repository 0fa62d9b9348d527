// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::Error;
use serde_json::json;

fn payload() -> Value {
    json!({
        "id": 42,
        "key": "PROJ-1",
        "title": "Crash",
        "description": null,
        "confidential": true,
        "labels": ["bug", {"name": "p1"}],
        "created_at": "2024-03-01T10:00:00Z",
        "updated": "2024-03-02T08:30:00.000+0000",
        "due_date": "2024-04-01",
        "author": {"id": 5, "username": "alice"},
        "access_level": 30
    })
}

fn conversion(err: Error) -> ConversionError {
    match err {
        Error::Conversion(e) => e,
        other => panic!("expected conversion error, got {other:?}"),
    }
}

#[test]
fn reads_ids_in_both_forms() {
    let value = payload();
    let fields = Fields::new(EntityKind::Issue, &value).unwrap();
    assert_eq!(fields.id("id").unwrap(), EntityId::Num(42));
    assert_eq!(fields.id("key").unwrap(), EntityId::Key("PROJ-1".into()));
    assert_eq!(fields.id("author.id").unwrap(), EntityId::Num(5));
}

#[test]
fn null_reads_as_absent() {
    let value = payload();
    let fields = Fields::new(EntityKind::Issue, &value).unwrap();
    assert_eq!(fields.opt_string("description").unwrap(), None);
    assert!(!fields.has("description"));
    let err = conversion(fields.string("description").unwrap_err());
    assert_eq!(err.key, "description");
    assert_eq!(err.reason, "is missing");
}

#[test]
fn wrong_type_is_tagged_with_kind_and_key() {
    let value = payload();
    let fields = Fields::new(EntityKind::Issue, &value).unwrap();
    let err = conversion(fields.string("id").unwrap_err());
    assert_eq!(err.kind, EntityKind::Issue);
    assert_eq!(err.key, "id");
    assert_eq!(err.reason, "is not a string");
}

#[test]
fn non_object_payload_is_rejected() {
    let value = json!([1, 2]);
    let err = conversion(Fields::new(EntityKind::Project, &value).unwrap_err());
    assert_eq!(err.kind, EntityKind::Project);
}

#[test]
fn reads_timestamps_and_dates() {
    let value = payload();
    let fields = Fields::new(EntityKind::Issue, &value).unwrap();
    let created = fields.timestamp("created_at").unwrap().unwrap();
    assert_eq!(created.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    let updated = fields.timestamp("updated").unwrap().unwrap();
    assert_eq!(updated.to_rfc3339(), "2024-03-02T08:30:00+00:00");
    assert_eq!(
        fields.date("due_date").unwrap(),
        NaiveDate::from_ymd_opt(2024, 4, 1)
    );
    assert!(fields.timestamp("title").is_err());
}

#[test]
fn reads_string_lists_and_flags() {
    let value = payload();
    let fields = Fields::new(EntityKind::Issue, &value).unwrap();
    assert_eq!(fields.strings("labels").unwrap(), vec!["bug", "p1"]);
    assert!(fields.strings("missing").unwrap().is_empty());
    assert!(fields.flag("confidential").unwrap());
    assert!(!fields.flag("missing").unwrap());
    assert_eq!(fields.opt_u32("access_level").unwrap(), Some(30));
}

#[test]
fn nested_errors_carry_the_full_path() {
    let value = payload();
    let fields = Fields::new(EntityKind::Issue, &value).unwrap();
    let author = fields.nested("author").unwrap();
    assert_eq!(author.string("username").unwrap(), "alice");
    let err = conversion(author.string("email").unwrap_err());
    assert_eq!(err.key, "author.email");
    assert!(fields.opt_nested("assignee").unwrap().is_none());
}
