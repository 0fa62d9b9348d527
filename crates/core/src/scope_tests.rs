// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

fn comments() -> ScopeChain {
    ScopeChain::new(["projects", "issues", "notes"])
}

#[test]
fn address_accepts_matching_parents() {
    let address = Address::new(
        EntityKind::Comment,
        comments(),
        vec![EntityId::Num(7), EntityId::Num(42)],
        Some(EntityId::Num(3)),
    )
    .unwrap();

    assert_eq!(address.to_string(), "projects/7/issues/42/notes/3");
    assert_eq!(address.chain().leaf(), Some("notes"));
    assert_eq!(
        address.global_id().unwrap().encode(),
        "7/42/3"
    );
}

#[test]
fn address_rejects_missing_parent() {
    let err = Address::new(
        EntityKind::Comment,
        comments(),
        vec![EntityId::Num(7)],
        Some(EntityId::Num(3)),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Addressing { kind: EntityKind::Comment, .. }));
    assert!(err.to_string().contains("needs 2 parent id(s), got 1"));
}

#[test]
fn address_rejects_extra_parent() {
    let err = Address::new(
        EntityKind::Account,
        ScopeChain::new(["users"]),
        vec![EntityId::Num(1)],
        None,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Addressing { .. }));
}

#[test]
fn address_rejects_empty_chain() {
    let err = Address::new(EntityKind::Account, ScopeChain::new(Vec::<String>::new()), vec![], None)
        .unwrap_err();
    assert!(err.to_string().contains("empty scope chain"));
}

#[test]
fn collection_drops_the_target() {
    let address = Address::new(
        EntityKind::Milestone,
        ScopeChain::new(["projects", "milestones"]),
        vec![EntityId::Num(7)],
        Some(EntityId::Num(1)),
    )
    .unwrap();

    let collection = address.collection();
    assert_eq!(collection.id(), None);
    assert_eq!(collection.to_string(), "projects/7/milestones");
    assert!(collection.global_id().is_none());
}
