// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub REST API.
//!
//! Repositories are addressed by their `owner/repo` full name, which spans two
//! path segments. Issue comments are addressed without their issue, and
//! organization memberships stand in for group members.

use serde_json::{json, Map, Value};
use ts_core::{
    Account, Address, Comment, Entity, EntityId, EntityKind, Fields, Group, Issue, IssueState,
    Label, Member, Milestone, Project, Reference, ScopeChain,
};

use super::{page_number, parent, put, target, unsupported, Dialect, Naming};
use crate::error::{Error, Result};
use crate::session::Credential;
use crate::transport::{Auth, Request, Verb};

const NAME: &str = "github";

const KINDS: &[EntityKind] = &[
    EntityKind::Account,
    EntityKind::Project,
    EntityKind::Issue,
    EntityKind::Milestone,
    EntityKind::Label,
    EntityKind::Comment,
    EntityKind::Group,
    EntityKind::Member,
];

#[derive(Debug, Clone, Default)]
pub struct GitHub;

impl GitHub {
    pub fn new() -> Self {
        GitHub
    }
}

/// Builds a request rooted at `repos/{owner}/{repo}`.
fn repo(verb: Verb, project: EntityId, scopes: &[&str]) -> Request {
    let mut all = vec!["repos".to_string()];
    all.push(scopes.join("/"));
    Request::new(verb, all.into_iter().filter(|s| !s.is_empty()))
        .with_parents(vec![project])
        .verbatim()
}

impl Dialect for GitHub {
    fn name(&self) -> &'static str {
        NAME
    }

    fn api_root(&self) -> String {
        String::new()
    }

    fn kinds(&self) -> &'static [EntityKind] {
        KINDS
    }

    fn scopes(&self, kind: EntityKind) -> ScopeChain {
        match kind {
            EntityKind::Account => ScopeChain::new(["users"]),
            EntityKind::Project => ScopeChain::new(["repos"]),
            EntityKind::Issue => ScopeChain::new(["repos", "issues"]),
            EntityKind::Milestone => ScopeChain::new(["repos", "milestones"]),
            EntityKind::Label => ScopeChain::new(["repos", "labels"]),
            EntityKind::Comment => ScopeChain::new(["repos", "issues", "comments"]),
            EntityKind::Group => ScopeChain::new(["orgs"]),
            EntityKind::Member => ScopeChain::new(["orgs", "members"]),
        }
    }

    fn naming(&self, kind: EntityKind) -> Naming {
        match kind {
            EntityKind::Account | EntityKind::Project | EntityKind::Group | EntityKind::Label => {
                Naming::Identifier
            }
            EntityKind::Member => Naming::Identifier,
            EntityKind::Comment => Naming::Unsupported,
            EntityKind::Issue | EntityKind::Milestone => Naming::Scan,
        }
    }

    fn hard_delete(&self, kind: EntityKind) -> bool {
        kind != EntityKind::Issue
    }

    fn fetch(&self, address: &Address) -> Result<Option<Request>> {
        let id = target(address)?.clone();
        let kind = address.kind();
        let parents = address.parents();
        let request = match kind {
            EntityKind::Account => Request::get(["users"]).with_id(id),
            EntityKind::Project => Request::get(["repos"]).with_id(id).verbatim(),
            EntityKind::Issue => repo(Verb::Get, parent(kind, parents, 0)?, &["issues"]).with_id(id),
            EntityKind::Milestone => {
                repo(Verb::Get, parent(kind, parents, 0)?, &["milestones"]).with_id(id)
            }
            EntityKind::Label => repo(Verb::Get, parent(kind, parents, 0)?, &["labels"]).with_id(id),
            EntityKind::Comment => {
                repo(Verb::Get, parent(kind, parents, 0)?, &["issues", "comments"]).with_id(id)
            }
            EntityKind::Group => Request::get(["orgs"]).with_id(id),
            EntityKind::Member => Request::get(["orgs", "memberships"])
                .with_parents(vec![parent(kind, parents, 0)?])
                .with_id(id),
        };
        Ok(Some(request))
    }

    fn list(&self, address: &Address) -> Result<Request> {
        let kind = address.kind();
        let parents = address.parents();
        let request = match kind {
            EntityKind::Account => Request::get(["users"]),
            EntityKind::Project => Request::get(["user", "repos"]),
            EntityKind::Issue => {
                repo(Verb::Get, parent(kind, parents, 0)?, &["issues"]).with_param("state", "all")
            }
            EntityKind::Milestone => repo(Verb::Get, parent(kind, parents, 0)?, &["milestones"])
                .with_param("state", "all"),
            EntityKind::Label => repo(Verb::Get, parent(kind, parents, 0)?, &["labels"]),
            EntityKind::Comment => Request::get(["repos", "issues", "comments"])
                .with_parents(vec![parent(kind, parents, 0)?, parent(kind, parents, 1)?])
                .verbatim(),
            EntityKind::Group => Request::get(["user", "orgs"]),
            EntityKind::Member => Request::get(["orgs", "members"])
                .with_parents(vec![parent(kind, parents, 0)?]),
        };
        Ok(request)
    }

    fn create(&self, address: &Address, entity: &Entity, body: Value) -> Result<Request> {
        let kind = address.kind();
        let parents = address.parents();
        let request = match kind {
            EntityKind::Account | EntityKind::Group => {
                return Err(unsupported(NAME, kind, "create"));
            }
            EntityKind::Project => Request::post(["user", "repos"]),
            EntityKind::Issue => repo(Verb::Post, parent(kind, parents, 0)?, &["issues"]),
            EntityKind::Milestone => repo(Verb::Post, parent(kind, parents, 0)?, &["milestones"]),
            EntityKind::Label => repo(Verb::Post, parent(kind, parents, 0)?, &["labels"]),
            EntityKind::Comment => Request::post(["repos", "issues", "comments"])
                .with_parents(vec![parent(kind, parents, 0)?, parent(kind, parents, 1)?])
                .verbatim(),
            EntityKind::Member => {
                let account = entity.id().cloned().ok_or(Error::Validation {
                    kind,
                    field: "account",
                })?;
                Request::new(Verb::Put, ["orgs", "memberships"])
                    .with_parents(vec![parent(kind, parents, 0)?])
                    .with_id(account)
            }
        };
        Ok(request.with_body(body))
    }

    fn modify(&self, address: &Address, _entity: &Entity, body: Value) -> Result<Request> {
        let request = self
            .fetch(address)?
            .ok_or_else(|| unsupported(NAME, address.kind(), "update"))?;
        let request = match address.kind() {
            EntityKind::Account => {
                return Err(unsupported(NAME, EntityKind::Account, "update"));
            }
            EntityKind::Member => request.with_verb(Verb::Put),
            _ => request.with_verb(Verb::Patch),
        };
        Ok(request.with_body(body))
    }

    fn delete(&self, address: &Address, _entity: &Entity) -> Result<Request> {
        match address.kind() {
            EntityKind::Account | EntityKind::Group | EntityKind::Issue => {
                Err(unsupported(NAME, address.kind(), "delete"))
            }
            _ => Ok(self
                .fetch(address)?
                .ok_or_else(|| unsupported(NAME, address.kind(), "delete"))?
                .with_verb(Verb::Delete)),
        }
    }

    fn paginate(
        &self,
        kind: EntityKind,
        request: &mut Request,
        page: usize,
        after: Option<&Value>,
        size: usize,
    ) -> bool {
        if kind != EntityKind::Account {
            page_number(request, page, size);
            return true;
        }
        // users are paged by the last id seen, `page` is ignored
        request.set_param("per_page", size.to_string());
        if let Some(id) = after.and_then(|item| item.get("id")).and_then(Value::as_u64) {
            request.set_param("since", id.to_string());
        }
        true
    }

    // the issues endpoint also lists pull requests
    fn keep(&self, kind: EntityKind, item: &Value) -> bool {
        kind != EntityKind::Issue || item.get("pull_request").is_none()
    }

    fn whoami(&self) -> Request {
        Request::get(["user"])
    }

    fn authorize(&self, credential: &Credential) -> Option<Auth> {
        match credential {
            Credential::Token(token) | Credential::OAuth(token) | Credential::Session(token) => {
                Some(Auth::Header {
                    name: "Authorization".to_string(),
                    value: format!("Bearer {}", token),
                })
            }
            Credential::Basic { user, password } => Some(Auth::Basic {
                user: user.clone(),
                password: password.clone(),
            }),
            Credential::Anonymous => None,
        }
    }

    fn decode(&self, kind: EntityKind, value: &Value, parents: &[EntityId]) -> Result<Entity> {
        let f = Fields::new(kind, value)?;
        let entity = match kind {
            EntityKind::Account => Entity::Account(Account {
                id: Some(f.key("login")?),
                name: f.string("login")?,
                fullname: f.opt_string("name")?,
                email: f.opt_string("email")?,
                password: None,
                avatar: f.opt_string("avatar_url")?,
                state: None,
                created: f.timestamp("created_at")?,
                updated: f.timestamp("updated_at")?,
            }),
            EntityKind::Project => Entity::Project(Project {
                id: Some(f.key("full_name")?),
                name: f.string("name")?,
                key: f.opt_string("full_name")?,
                description: f.opt_string("description")?,
                owner: user_ref(&f, "owner")?,
                url: f.opt_string("html_url")?,
                avatar: None,
                public: !f.flag("private")?,
                archived: f.flag("archived")?,
                tags: f.strings("topics")?,
                created: f.timestamp("created_at")?,
                updated: f.timestamp("updated_at")?,
            }),
            EntityKind::Issue => Entity::Issue(issue(&f, parents)?),
            EntityKind::Milestone => Entity::Milestone(Milestone {
                id: Some(f.id("number")?),
                project: parent(kind, parents, 0)?,
                name: f.string("title")?,
                description: f.opt_string("description")?,
                state: f.opt_string("state")?,
                due_date: f.timestamp("due_on")?.map(|t| t.date_naive()),
                created: f.timestamp("created_at")?,
                updated: f.timestamp("updated_at")?,
            }),
            EntityKind::Label => Entity::Label(Label {
                id: Some(EntityId::Key(f.string("name")?)),
                project: parent(kind, parents, 0)?,
                name: f.string("name")?,
                color: f.opt_string("color")?,
                description: f.opt_string("description")?,
            }),
            EntityKind::Comment => Entity::Comment(comment(&f, parents)?),
            EntityKind::Group => Entity::Group(Group {
                id: Some(f.key("login")?),
                name: f.opt_string("name")?.unwrap_or(f.string("login")?),
                path: f.opt_string("login")?,
                description: f.opt_string("description")?,
                url: f.opt_string("html_url")?,
                members: Default::default(),
            }),
            EntityKind::Member => {
                // memberships wrap the user; member listings are bare users
                let user = f.opt_nested("user")?.unwrap_or(f);
                Entity::Member(Member {
                    account: Some(user.key("login")?),
                    group: match f.opt_nested("organization")? {
                        Some(org) => org.key("login")?,
                        None => parent(kind, parents, 0)?,
                    },
                    name: user.opt_string("login")?,
                    access_level: None,
                })
            }
        };
        Ok(entity)
    }

    fn encode(&self, entity: &Entity, previous: Option<&Entity>) -> Result<Value> {
        let mut body = Map::new();
        match entity {
            Entity::Account(_) => return Err(unsupported(NAME, EntityKind::Account, "write")),
            Entity::Project(p) => {
                body.insert("name".into(), json!(p.name));
                put(&mut body, "description", p.description.as_ref())?;
                body.insert("private".into(), json!(!p.public));
                if previous.is_some() {
                    body.insert("archived".into(), json!(p.archived));
                }
            }
            Entity::Issue(i) => {
                body.insert("title".into(), json!(i.name));
                put(&mut body, "body", i.description.as_ref())?;
                body.insert("labels".into(), json!(i.labels));
                if let Some(assignee) = &i.assignee {
                    body.insert("assignees".into(), json!([assignee.id]));
                }
                put(&mut body, "milestone", i.milestone.as_ref().map(|m| &m.id))?;
                if previous.is_some() || i.id.is_some() {
                    body.insert("state".into(), json!(i.state.as_str()));
                }
            }
            Entity::Milestone(m) => {
                body.insert("title".into(), json!(m.name));
                put(&mut body, "description", m.description.as_ref())?;
                put(&mut body, "state", m.state.as_ref())?;
                put(
                    &mut body,
                    "due_on",
                    m.due_date.map(|d| format!("{}T00:00:00Z", d)),
                )?;
            }
            Entity::Label(l) => {
                match previous {
                    Some(Entity::Label(old)) if old.name != l.name => {
                        body.insert("new_name".into(), json!(l.name));
                    }
                    Some(_) => {}
                    None => {
                        body.insert("name".into(), json!(l.name));
                    }
                }
                put(
                    &mut body,
                    "color",
                    l.color.as_ref().map(|c| c.trim_start_matches('#').to_string()),
                )?;
                put(&mut body, "description", l.description.as_ref())?;
            }
            Entity::Comment(c) => {
                body.insert("body".into(), json!(c.content));
            }
            Entity::Group(g) => {
                body.insert("name".into(), json!(g.name));
                put(&mut body, "description", g.description.as_ref())?;
            }
            Entity::Member(_) => {
                body.insert("role".into(), json!("member"));
            }
        }
        Ok(Value::Object(body))
    }
}

fn user_ref(f: &Fields<'_>, key: &'static str) -> Result<Option<Reference>> {
    let Some(user) = f.opt_nested(key)? else {
        return Ok(None);
    };
    let login = user.string("login")?;
    Ok(Some(
        Reference::new(EntityKind::Account, EntityId::Key(login.clone())).named(login),
    ))
}

fn issue(f: &Fields<'_>, parents: &[EntityId]) -> Result<Issue> {
    let project = parent(EntityKind::Issue, parents, 0)?;
    let milestone = match f.opt_nested("milestone")? {
        Some(m) => Some(
            Reference::new(EntityKind::Milestone, m.id("number")?)
                .within(vec![project.clone()])
                .named(m.string("title")?),
        ),
        None => None,
    };
    Ok(Issue {
        id: Some(f.id("number")?),
        project,
        name: f.string("title")?,
        description: f.opt_string("body")?,
        state: match f.string("state")?.as_str() {
            "closed" => IssueState::Closed,
            _ => IssueState::Open,
        },
        labels: f.strings("labels")?,
        assignee: user_ref(f, "assignee")?,
        milestone,
        parent: None,
        owner: user_ref(f, "user")?,
        url: f.opt_string("html_url")?,
        created: f.timestamp("created_at")?,
        updated: f.timestamp("updated_at")?,
    })
}

fn comment(f: &Fields<'_>, parents: &[EntityId]) -> Result<Comment> {
    let project = parent(EntityKind::Comment, parents, 0)?;
    // issue_url ends with the issue number
    let from_url = f
        .opt_string("issue_url")?
        .and_then(|url| url.rsplit('/').next().map(EntityId::parse));
    let issue = match from_url {
        Some(id @ EntityId::Num(_)) => id,
        _ => parent(EntityKind::Comment, parents, 1)?,
    };
    Ok(Comment {
        id: Some(f.id("id")?),
        project,
        issue,
        content: f.string("body")?,
        attachment: None,
        owner: user_ref(f, "user")?,
        created: f.timestamp("created_at")?,
        updated: f.timestamp("updated_at")?,
    })
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
