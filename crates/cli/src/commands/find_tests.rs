// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::backend::Backend;
use crate::testing::{store, FakeTransport};
use crate::transport::Verb;
use serde_json::json;
use ts_core::EntityId;

fn fake_issues() -> FakeTransport {
    let fake = FakeTransport::new();
    fake.on(
        Verb::Get,
        "projects/7/issues",
        json!([
            { "iid": 1, "project_id": 7, "title": "Crash", "state": "opened", "labels": ["bug"] },
            { "iid": 2, "project_id": 7, "title": "Typo", "state": "closed", "labels": ["docs"] },
            { "iid": 3, "project_id": 7, "title": "Leak", "state": "opened", "labels": ["bug"] },
        ]),
    );
    fake
}

fn run(fake: &FakeTransport, query: &Query, limit: Option<usize>, format: OutputFormat) -> String {
    let store = store(Backend::Gitlab, fake);
    let mut out = Vec::new();
    run_impl(&store, &mut out, EntityKind::Issue, query, limit, format).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn build_query_with_parents() {
    let query = build_query(&["7".to_string()], &[("state".to_string(), "open".to_string())]);
    assert_eq!(query.parents, Some(vec![EntityId::Num(7)]));
    assert!(!query.is_empty());
}

#[test]
fn build_query_without_parents_discovers() {
    let query = build_query(&[], &[]);
    assert_eq!(query.parents, None);
    assert!(query.is_empty());
}

#[test]
fn lists_all_as_lines() {
    let fake = fake_issues();
    let text = run(&fake, &build_query(&["7".into()], &[]), None, OutputFormat::Text);
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec![
            "- issue 7/1: Crash",
            "- issue 7/2: Typo (closed)",
            "- issue 7/3: Leak",
        ]
    );
}

#[test]
fn criteria_are_anded() {
    let fake = fake_issues();
    let query = build_query(
        &["7".into()],
        &[
            ("labels".into(), "bug".into()),
            ("name".into(), "Leak".into()),
        ],
    );
    let text = run(&fake, &query, None, OutputFormat::Text);
    assert_eq!(text.trim(), "- issue 7/3: Leak");
}

#[test]
fn limit_stops_early() {
    let fake = fake_issues();
    let text = run(&fake, &build_query(&["7".into()], &[]), Some(2), OutputFormat::Json);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["kind"], "issue");
    }
}

#[test]
fn no_match_prints_nothing() {
    let fake = fake_issues();
    let query = build_query(&["7".into()], &[("state".into(), "merged".into())]);
    assert_eq!(run(&fake, &query, None, OutputFormat::Text), "");
}
