// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;

fn comment() -> Entity {
    let mut c = Comment::new(EntityId::Num(7), EntityId::Num(42), "first\nsecond");
    c.id = Some(EntityId::Num(3));
    Entity::Comment(c)
}

#[test]
fn parents_follow_lineage() {
    let entity = comment();
    assert_eq!(entity.kind(), EntityKind::Comment);
    assert_eq!(entity.parents(), vec![EntityId::Num(7), EntityId::Num(42)]);
    assert_eq!(entity.parents().len(), entity.kind().depth());
    assert_eq!(entity.global_id().unwrap().encode(), "7/42/3");
}

#[test]
fn member_is_identified_by_account() {
    let member = Entity::Member(Member::new(EntityId::Num(5), EntityId::Num(10)));
    assert_eq!(member.id(), Some(&EntityId::Num(10)));
    assert_eq!(member.parents(), vec![EntityId::Num(5)]);
}

#[test]
fn unsaved_entity_has_no_global_id() {
    let issue = Entity::Issue(Issue::new(EntityId::Num(7), "Crash"));
    assert!(issue.global_id().is_none());
    assert!(issue.reference().is_none());
}

#[test]
fn reference_carries_name_and_parents() {
    let issue = Entity::Issue(Issue::new(EntityId::Num(7), "Crash").with_id(EntityId::Num(42)));
    let reference = issue.reference().unwrap();
    assert_eq!(reference.kind, EntityKind::Issue);
    assert_eq!(reference.parents, vec![EntityId::Num(7)]);
    assert_eq!(reference.name.as_deref(), Some("Crash"));
    assert_eq!(reference.global_id().encode(), "7/42");
}

#[test]
fn closing_an_issue() {
    let issue = Entity::Issue(Issue::new(EntityId::Num(7), "Crash").with_id(EntityId::Num(42)));
    assert!(!issue.is_closed());
    let closed = issue.closed().unwrap();
    assert!(closed.is_closed());
    assert!(Entity::Label(Label::new(EntityId::Num(7), "bug")).closed().is_none());
}

#[test]
fn display_shows_kind_id_and_name() {
    let issue = Entity::Issue(Issue::new(EntityId::Num(7), "Crash").with_id(EntityId::Num(42)));
    assert_eq!(issue.to_string(), "issue 7/42: Crash");
    assert_eq!(comment().to_string(), "comment 7/42/3: first");
}

#[test]
fn serializes_with_kind_tag() {
    let label = Entity::Label(Label::new(EntityId::Num(7), "bug").with_color("#ff0000"));
    let value = label.to_value().unwrap();
    assert_eq!(value["kind"], "label");
    assert_eq!(value["name"], "bug");
    assert_eq!(value["color"], "#ff0000");
}

#[test]
fn password_is_never_serialized() {
    let mut account = Account::new("alice");
    account.password = Some("hunter2".into());
    let value = Entity::Account(account).to_value().unwrap();
    assert!(value.get("password").is_none());
}

#[test]
fn from_fields_builds_the_requested_kind() {
    let entity = Entity::from_fields(
        EntityKind::Issue,
        json!({"project": 7, "name": "Crash", "labels": ["bug"]}),
    )
    .unwrap();
    let issue = Issue::from_entity(entity).unwrap();
    assert_eq!(issue.project, EntityId::Num(7));
    assert_eq!(issue.state, IssueState::Open);
    assert_eq!(issue.labels, vec!["bug".to_string()]);
}

#[test]
fn from_fields_reports_missing_required_field() {
    let err = Entity::from_fields(EntityKind::Issue, json!({"name": "Crash"})).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn record_rejects_other_kinds() {
    let err = Issue::from_entity(comment()).unwrap_err();
    assert!(matches!(
        err,
        Error::KindMismatch {
            expected: EntityKind::Issue,
            found: EntityKind::Comment
        }
    ));
}

#[test]
fn membership_delta_between_groups() {
    let old = Group::new("devs").with_members([1u64, 2, 3].map(EntityId::Num));
    let new = Group::new("devs").with_members([2u64, 3, 4].map(EntityId::Num));

    let delta = MembershipDelta::between(&new, &old);
    assert_eq!(delta.to_add.into_iter().collect::<Vec<_>>(), vec![EntityId::Num(4)]);
    assert_eq!(delta.to_remove.into_iter().collect::<Vec<_>>(), vec![EntityId::Num(1)]);
}

#[test]
fn membership_delta_is_empty_for_same_members() {
    let group = Group::new("devs").with_members([1u64, 2].map(EntityId::Num));
    assert!(MembershipDelta::between(&group, &group).is_empty());
}
