// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;
use ts_core::{Issue, Label};
use yare::parameterized;

#[parameterized(
    gitlab = { "gitlab", Backend::Gitlab },
    github_upper = { "GitHub", Backend::Github },
    jira = { "jira", Backend::Jira },
)]
fn backend_from_str(input: &str, expected: Backend) {
    assert_eq!(input.parse::<Backend>().unwrap(), expected);
}

#[test]
fn backend_unknown_has_hint() {
    let err = "svn".parse::<Backend>().unwrap_err();
    assert!(err.to_string().contains("hint:"));
}

#[test]
fn backend_dialect_names() {
    for backend in [Backend::Gitlab, Backend::Github, Backend::Jira] {
        assert_eq!(backend.dialect(None).name(), backend.as_str());
    }
}

#[test]
fn api_roots() {
    assert_eq!(Backend::Gitlab.dialect(None).api_root(), "api/v4");
    assert_eq!(Backend::Gitlab.dialect(Some("v3")).api_root(), "api/v3");
    assert_eq!(Backend::Github.dialect(None).api_root(), "");
    assert_eq!(Backend::Jira.dialect(Some("3")).api_root(), "rest/api/3");
}

#[test]
fn scope_chains_match_lineage_depth() {
    for backend in [Backend::Gitlab, Backend::Github, Backend::Jira] {
        let dialect = backend.dialect(None);
        for &kind in dialect.kinds() {
            assert_eq!(
                dialect.scopes(kind).len(),
                kind.depth() + 1,
                "{} {}",
                backend,
                kind
            );
        }
    }
}

#[test]
fn at_interleaves_address() {
    let dialect = GitLab::new(None);
    let address = Address::new(
        EntityKind::Comment,
        dialect.scopes(EntityKind::Comment),
        vec![EntityId::Num(7), EntityId::Num(42)],
        Some(EntityId::Num(3)),
    )
    .unwrap();
    let request = at(Verb::Delete, &address);
    assert_eq!(request.to_string(), "DELETE projects/7/issues/42/notes/3");
}

#[test]
fn page_number_is_one_based() {
    let mut request = Request::get(["users"]);
    page_number(&mut request, 0, 20);
    assert_eq!(request.param("page"), Some("1"));
    assert_eq!(request.param("per_page"), Some("20"));
    page_number(&mut request, 2, 20);
    assert_eq!(request.param("page"), Some("3"));
}

#[test]
fn put_skips_none() {
    let mut body = serde_json::Map::new();
    put(&mut body, "a", Some("x")).unwrap();
    put::<&str>(&mut body, "b", None).unwrap();
    assert_eq!(Value::Object(body), json!({ "a": "x" }));
}

#[test]
fn default_items_rejects_objects() {
    let dialect = GitLab::new(None);
    assert_eq!(dialect.items(EntityKind::Issue, Value::Null).unwrap().len(), 0);
    assert_eq!(dialect.items(EntityKind::Issue, json!([1, 2])).unwrap().len(), 2);
    let err = dialect.items(EntityKind::Issue, json!({})).unwrap_err();
    assert!(matches!(err, Error::Conversion(_)));
}

#[test]
fn empty_write_response_refetches() {
    let dialect = GitLab::new(None);
    let issue = Entity::Issue(Issue::new(EntityId::Num(7), "Crash").with_id(EntityId::Num(42)));
    assert_eq!(
        dialect.decode_written(&issue, &Value::Null).unwrap(),
        Written::Refetch(EntityId::Num(42))
    );

    let label = Entity::Label(Label::new(EntityId::Num(7), "bug"));
    assert!(matches!(
        dialect.decode_written(&label, &Value::Null),
        Err(Error::Addressing { .. })
    ));
}
