// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::backend::Backend;
use crate::testing::{store, FakeTransport};
use crate::transport::Verb;

fn me() -> serde_json::Value {
    json!({ "id": 1, "username": "ann", "name": "Ann Example", "email": "ann@example.com" })
}

#[test]
fn status_connected() {
    let fake = FakeTransport::new();
    fake.on(Verb::Get, "user", me());
    let store = store(Backend::Gitlab, &fake);
    let mut out = Vec::new();

    run_impl(&store, &mut out, OutputFormat::Text).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "backend: gitlab\nconnected: yes\n");
}

#[test]
fn status_disconnected_is_not_an_error() {
    let fake = FakeTransport::new();
    fake.fail(Verb::Get, "user", 401);
    let store = store(Backend::Github, &fake);
    let mut out = Vec::new();

    run_impl(&store, &mut out, OutputFormat::Json).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value, json!({ "backend": "github", "connected": false }));
}

#[test]
fn whoami_prints_account() {
    let fake = FakeTransport::new();
    fake.on(Verb::Get, "user", me());
    let store = store(Backend::Gitlab, &fake);
    let mut out = Vec::new();

    whoami_impl(&store, &mut out, OutputFormat::Text).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("account 1: ann\n"));
    assert!(text.contains("Email: ann@example.com"));
}

#[test]
fn whoami_propagates_failure() {
    let fake = FakeTransport::new();
    fake.fail(Verb::Get, "user", 500);
    let store = store(Backend::Gitlab, &fake);
    let mut out = Vec::new();

    assert!(whoami_impl(&store, &mut out, OutputFormat::Text).is_err());
    assert!(out.is_empty());
}
