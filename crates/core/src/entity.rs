// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The typed entity model.
//!
//! Entities are plain records. They are built from remote responses (or by a
//! caller preparing a write payload) and never mutated by the engine
//! afterwards. Relations to other entities are [`Reference`]s: ids only,
//! followed explicitly through the store, never resolved eagerly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::id::{EntityId, GlobalId};
use crate::kind::EntityKind;

/// A non-owning pointer to another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub kind: EntityKind,
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Reference {
    pub fn new(kind: EntityKind, id: EntityId) -> Self {
        Reference {
            kind,
            id,
            parents: Vec::new(),
            name: None,
        }
    }

    pub fn within(mut self, parents: Vec<EntityId>) -> Self {
        self.parents = parents;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn global_id(&self) -> GlobalId {
        GlobalId::new(self.id.clone(), self.parents.clone())
    }
}

/// A user on the remote system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Option<EntityId>,
    /// Login or username.
    pub name: String,
    pub fullname: Option<String>,
    pub email: Option<String>,
    /// Only used in create payloads; never read back.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    pub avatar: Option<String>,
    pub state: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Account {
            id: None,
            name: name.into(),
            fullname: None,
            email: None,
            password: None,
            avatar: None,
            state: None,
            created: None,
            updated: None,
        }
    }
}

/// A project (GitLab project, GitHub repository, Jira project).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<EntityId>,
    pub name: String,
    /// Backend short key: Jira project key, GitHub `owner/repo`, GitLab path.
    pub key: Option<String>,
    pub description: Option<String>,
    pub owner: Option<Reference>,
    pub url: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            id: None,
            name: name.into(),
            key: None,
            description: None,
            owner: None,
            url: None,
            avatar: None,
            public: false,
            archived: false,
            tags: Vec::new(),
            created: None,
            updated: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_owner(mut self, owner: Reference) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Open/closed state of an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: Option<EntityId>,
    pub project: EntityId,
    /// Title.
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub state: IssueState,
    /// Label names.
    #[serde(default)]
    pub labels: Vec<String>,
    pub assignee: Option<Reference>,
    pub milestone: Option<Reference>,
    pub parent: Option<Reference>,
    pub owner: Option<Reference>,
    pub url: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl Issue {
    pub fn new(project: EntityId, name: impl Into<String>) -> Self {
        Issue {
            id: None,
            project,
            name: name.into(),
            description: None,
            state: IssueState::Open,
            labels: Vec::new(),
            assignee: None,
            milestone: None,
            parent: None,
            owner: None,
            url: None,
            created: None,
            updated: None,
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_state(mut self, state: IssueState) -> Self {
        self.state = state;
        self
    }
}

/// A milestone (Jira: version).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Option<EntityId>,
    pub project: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub state: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl Milestone {
    pub fn new(project: EntityId, name: impl Into<String>) -> Self {
        Milestone {
            id: None,
            project,
            name: name.into(),
            description: None,
            state: None,
            due_date: None,
            created: None,
            updated: None,
        }
    }
}

/// A project label. Most backends identify labels by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: Option<EntityId>,
    pub project: EntityId,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl Label {
    pub fn new(project: EntityId, name: impl Into<String>) -> Self {
        Label {
            id: None,
            project,
            name: name.into(),
            color: None,
            description: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<EntityId>,
    pub project: EntityId,
    pub issue: EntityId,
    pub content: String,
    pub attachment: Option<String>,
    pub owner: Option<Reference>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(project: EntityId, issue: EntityId, content: impl Into<String>) -> Self {
        Comment {
            id: None,
            project,
            issue,
            content: content.into(),
            attachment: None,
            owner: None,
            created: None,
            updated: None,
        }
    }
}

/// A group of accounts (GitLab group, GitHub organization, Jira group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Option<EntityId>,
    pub name: String,
    pub path: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    /// Member account ids. Populated by `get`, not by `find`.
    #[serde(default)]
    pub members: BTreeSet<EntityId>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group {
            id: None,
            name: name.into(),
            path: None,
            description: None,
            url: None,
            members: BTreeSet::new(),
        }
    }

    pub fn with_members<I: IntoIterator<Item = EntityId>>(mut self, members: I) -> Self {
        self.members = members.into_iter().collect();
        self
    }
}

/// Membership of one account in a group. Identified by the account id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub account: Option<EntityId>,
    pub group: EntityId,
    /// Username of the member account.
    pub name: Option<String>,
    pub access_level: Option<u32>,
}

impl Member {
    pub fn new(group: EntityId, account: EntityId) -> Self {
        Member {
            account: Some(account),
            group,
            name: None,
            access_level: None,
        }
    }
}

/// Accounts to add to and remove from a group to go from `old` to `new`.
///
/// Remote APIs have no atomic "set membership" call, so membership changes
/// are replayed one account at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDelta {
    pub to_add: BTreeSet<EntityId>,
    pub to_remove: BTreeSet<EntityId>,
}

impl MembershipDelta {
    pub fn between(new: &Group, old: &Group) -> Self {
        MembershipDelta {
            to_add: new.members.difference(&old.members).cloned().collect(),
            to_remove: old.members.difference(&new.members).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Any entity, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Account(Account),
    Project(Project),
    Issue(Issue),
    Milestone(Milestone),
    Label(Label),
    Comment(Comment),
    Group(Group),
    Member(Member),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Account(_) => EntityKind::Account,
            Entity::Project(_) => EntityKind::Project,
            Entity::Issue(_) => EntityKind::Issue,
            Entity::Milestone(_) => EntityKind::Milestone,
            Entity::Label(_) => EntityKind::Label,
            Entity::Comment(_) => EntityKind::Comment,
            Entity::Group(_) => EntityKind::Group,
            Entity::Member(_) => EntityKind::Member,
        }
    }

    pub fn id(&self) -> Option<&EntityId> {
        match self {
            Entity::Account(e) => e.id.as_ref(),
            Entity::Project(e) => e.id.as_ref(),
            Entity::Issue(e) => e.id.as_ref(),
            Entity::Milestone(e) => e.id.as_ref(),
            Entity::Label(e) => e.id.as_ref(),
            Entity::Comment(e) => e.id.as_ref(),
            Entity::Group(e) => e.id.as_ref(),
            Entity::Member(e) => e.account.as_ref(),
        }
    }

    /// Display name, for the kinds that have one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Entity::Account(e) => Some(&e.name),
            Entity::Project(e) => Some(&e.name),
            Entity::Issue(e) => Some(&e.name),
            Entity::Milestone(e) => Some(&e.name),
            Entity::Label(e) => Some(&e.name),
            Entity::Comment(_) => None,
            Entity::Group(e) => Some(&e.name),
            Entity::Member(e) => e.name.as_deref(),
        }
    }

    /// Parent ids from the root down, matching `kind().lineage()`.
    pub fn parents(&self) -> Vec<EntityId> {
        match self {
            Entity::Account(_) | Entity::Project(_) | Entity::Group(_) => Vec::new(),
            Entity::Issue(e) => vec![e.project.clone()],
            Entity::Milestone(e) => vec![e.project.clone()],
            Entity::Label(e) => vec![e.project.clone()],
            Entity::Comment(e) => vec![e.project.clone(), e.issue.clone()],
            Entity::Member(e) => vec![e.group.clone()],
        }
    }

    pub fn global_id(&self) -> Option<GlobalId> {
        self.id()
            .map(|id| GlobalId::new(id.clone(), self.parents()))
    }

    pub fn reference(&self) -> Option<Reference> {
        let id = self.id()?.clone();
        let mut reference = Reference::new(self.kind(), id).within(self.parents());
        reference.name = self.name().map(str::to_string);
        Some(reference)
    }

    /// True for entities in a terminal "removed" state (closed issues).
    pub fn is_closed(&self) -> bool {
        matches!(self, Entity::Issue(issue) if issue.state == IssueState::Closed)
    }

    /// A closed copy of this entity, for kinds that close instead of being
    /// deleted.
    pub fn closed(&self) -> Option<Entity> {
        match self {
            Entity::Issue(issue) => Some(Entity::Issue(issue.clone().with_state(IssueState::Closed))),
            _ => None,
        }
    }

    /// The entity as a JSON object, including its `kind` tag.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Builds an entity of the given kind from a JSON object of its fields.
    pub fn from_fields(kind: EntityKind, mut fields: serde_json::Value) -> Result<Entity> {
        if let Some(object) = fields.as_object_mut() {
            object.insert(
                "kind".to_string(),
                serde_json::Value::String(kind.as_str().to_string()),
            );
        }
        Ok(serde_json::from_value(fields)?)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        if let Some(gid) = self.global_id() {
            write!(f, " {}", gid)?;
        }
        match self {
            Entity::Comment(c) => write!(f, ": {}", first_line(&c.content)),
            other => match other.name() {
                Some(name) => write!(f, ": {}", name),
                None => Ok(()),
            },
        }
    }
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}

/// A concrete entity type that can be pulled out of an [`Entity`].
pub trait Record: Sized + Into<Entity> {
    const KIND: EntityKind;

    fn from_entity(entity: Entity) -> Result<Self>;
}

macro_rules! record {
    ($variant:ident) => {
        impl From<$variant> for Entity {
            fn from(e: $variant) -> Self {
                Entity::$variant(e)
            }
        }

        impl Record for $variant {
            const KIND: EntityKind = EntityKind::$variant;

            fn from_entity(entity: Entity) -> Result<Self> {
                match entity {
                    Entity::$variant(e) => Ok(e),
                    other => Err(Error::KindMismatch {
                        expected: Self::KIND,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

record!(Account);
record!(Project);
record!(Issue);
record!(Milestone);
record!(Label);
record!(Comment);
record!(Group);
record!(Member);

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
