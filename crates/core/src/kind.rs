// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entity kinds and their parent lineage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The entity types the engine knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Account,
    Project,
    Issue,
    Milestone,
    Label,
    Comment,
    Group,
    Member,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Account,
        EntityKind::Project,
        EntityKind::Issue,
        EntityKind::Milestone,
        EntityKind::Label,
        EntityKind::Comment,
        EntityKind::Group,
        EntityKind::Member,
    ];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Project => "project",
            EntityKind::Issue => "issue",
            EntityKind::Milestone => "milestone",
            EntityKind::Label => "label",
            EntityKind::Comment => "comment",
            EntityKind::Group => "group",
            EntityKind::Member => "member",
        }
    }

    /// Parent kinds from the root down to the immediate parent.
    ///
    /// A comment lives in an issue which lives in a project, so its lineage is
    /// `[Project, Issue]`.
    pub fn lineage(&self) -> &'static [EntityKind] {
        match self {
            EntityKind::Account | EntityKind::Project | EntityKind::Group => &[],
            EntityKind::Issue | EntityKind::Milestone | EntityKind::Label => {
                &[EntityKind::Project]
            }
            EntityKind::Comment => &[EntityKind::Project, EntityKind::Issue],
            EntityKind::Member => &[EntityKind::Group],
        }
    }

    /// Number of parent ids needed to address one entity of this kind.
    pub fn depth(&self) -> usize {
        self.lineage().len()
    }

    /// The immediate parent kind, if any.
    pub fn parent(&self) -> Option<EntityKind> {
        self.lineage().last().copied()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "account" | "accounts" | "user" | "users" => Ok(EntityKind::Account),
            "project" | "projects" | "repo" | "repos" => Ok(EntityKind::Project),
            "issue" | "issues" => Ok(EntityKind::Issue),
            "milestone" | "milestones" | "version" | "versions" => Ok(EntityKind::Milestone),
            "label" | "labels" => Ok(EntityKind::Label),
            "comment" | "comments" | "note" | "notes" => Ok(EntityKind::Comment),
            "group" | "groups" | "org" | "orgs" => Ok(EntityKind::Group),
            "member" | "members" => Ok(EntityKind::Member),
            _ => Err(Error::UnknownType(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
