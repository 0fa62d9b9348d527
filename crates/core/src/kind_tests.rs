// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    account = { EntityKind::Account, 0 },
    project = { EntityKind::Project, 0 },
    group = { EntityKind::Group, 0 },
    issue = { EntityKind::Issue, 1 },
    milestone = { EntityKind::Milestone, 1 },
    label = { EntityKind::Label, 1 },
    member = { EntityKind::Member, 1 },
    comment = { EntityKind::Comment, 2 },
)]
fn depth_matches_lineage(kind: EntityKind, depth: usize) {
    assert_eq!(kind.depth(), depth);
    assert_eq!(kind.lineage().len(), depth);
}

#[test]
fn comment_lineage_is_project_then_issue() {
    assert_eq!(
        EntityKind::Comment.lineage(),
        &[EntityKind::Project, EntityKind::Issue]
    );
    assert_eq!(EntityKind::Comment.parent(), Some(EntityKind::Issue));
    assert_eq!(EntityKind::Project.parent(), None);
}

#[test]
fn lineage_is_closed_under_parents() {
    // Every parent's own lineage is the prefix preceding it.
    for kind in EntityKind::ALL {
        let lineage = kind.lineage();
        for (i, parent) in lineage.iter().enumerate() {
            assert_eq!(parent.lineage(), &lineage[..i], "{} via {}", kind, parent);
        }
    }
}

#[parameterized(
    singular = { "issue", EntityKind::Issue },
    plural = { "milestones", EntityKind::Milestone },
    upper = { "GROUP", EntityKind::Group },
    alias_repo = { "repo", EntityKind::Project },
    alias_note = { "notes", EntityKind::Comment },
    alias_user = { "user", EntityKind::Account },
)]
fn parse_kind(input: &str, expected: EntityKind) {
    assert_eq!(input.parse::<EntityKind>().unwrap(), expected);
}

#[test]
fn parse_unknown_kind_fails() {
    let err = "widget".parse::<EntityKind>().unwrap_err();
    assert!(matches!(err, Error::UnknownType(ref s) if s == "widget"));
}

#[test]
fn display_round_trips_through_parse() {
    for kind in EntityKind::ALL {
        assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
    }
}
