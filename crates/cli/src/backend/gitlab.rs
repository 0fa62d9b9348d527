// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GitLab REST API (v4).

use serde_json::{json, Map, Value};
use ts_core::{
    Account, Address, Comment, Entity, EntityId, EntityKind, Fields, Group, Issue, IssueState,
    Label, Member, Milestone, Project, Reference, ScopeChain,
};

use super::{at, page_number, parent, put, target, Dialect, Naming};
use crate::error::{Error, Result};
use crate::session::Credential;
use crate::transport::{Auth, Request, Verb};

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

/// Developer access, the level new members get unless one is given.
const DEFAULT_ACCESS_LEVEL: u32 = 30;

#[derive(Debug, Clone)]
pub struct GitLab {
    version: String,
}

impl GitLab {
    pub fn new(api_version: Option<&str>) -> Self {
        GitLab {
            version: api_version.unwrap_or("4").trim_start_matches('v').to_string(),
        }
    }
}

impl Dialect for GitLab {
    fn name(&self) -> &'static str {
        "gitlab"
    }

    fn api_root(&self) -> String {
        format!("api/v{}", self.version)
    }

    fn kinds(&self) -> &'static [EntityKind] {
        KINDS
    }

    fn scopes(&self, kind: EntityKind) -> ScopeChain {
        match kind {
            EntityKind::Account => ScopeChain::new(["users"]),
            EntityKind::Project => ScopeChain::new(["projects"]),
            EntityKind::Issue => ScopeChain::new(["projects", "issues"]),
            EntityKind::Milestone => ScopeChain::new(["projects", "milestones"]),
            EntityKind::Label => ScopeChain::new(["projects", "labels"]),
            EntityKind::Comment => ScopeChain::new(["projects", "issues", "notes"]),
            EntityKind::Group => ScopeChain::new(["groups"]),
            EntityKind::Member => ScopeChain::new(["groups", "members"]),
        }
    }

    fn naming(&self, kind: EntityKind) -> Naming {
        match kind {
            EntityKind::Account => Naming::Search("username"),
            EntityKind::Project | EntityKind::Group | EntityKind::Issue => Naming::Search("search"),
            EntityKind::Milestone => Naming::Search("title"),
            EntityKind::Label => Naming::Identifier,
            EntityKind::Comment => Naming::Unsupported,
            EntityKind::Member => Naming::Scan,
        }
    }

    fn hard_delete(&self, kind: EntityKind) -> bool {
        kind != EntityKind::Issue
    }

    fn fetch(&self, address: &Address) -> Result<Option<Request>> {
        target(address)?;
        Ok(Some(at(Verb::Get, address)))
    }

    fn list(&self, address: &Address) -> Result<Request> {
        Ok(at(Verb::Get, &address.collection()))
    }

    fn create(&self, address: &Address, _entity: &Entity, body: Value) -> Result<Request> {
        Ok(at(Verb::Post, &address.collection()).with_body(body))
    }

    fn modify(&self, address: &Address, _entity: &Entity, body: Value) -> Result<Request> {
        target(address)?;
        Ok(at(Verb::Put, address).with_body(body))
    }

    fn delete(&self, address: &Address, _entity: &Entity) -> Result<Request> {
        target(address)?;
        Ok(at(Verb::Delete, address))
    }

    fn paginate(
        &self,
        _kind: EntityKind,
        request: &mut Request,
        page: usize,
        _after: Option<&Value>,
        size: usize,
    ) -> bool {
        page_number(request, page, size);
        true
    }

    fn whoami(&self) -> Request {
        Request::get(["user"])
    }

    fn login(&self, user: &str, password: &str) -> Option<Request> {
        let key = if user.contains('@') { "email" } else { "login" };
        let mut body = Map::new();
        body.insert(key.to_string(), json!(user));
        body.insert("password".to_string(), json!(password));
        Some(Request::post(["session"]).with_body(Value::Object(body)))
    }

    fn session_token(&self, response: &Value) -> Result<String> {
        Ok(Fields::new(EntityKind::Account, response)?.string("private_token")?)
    }

    fn authorize(&self, credential: &Credential) -> Option<Auth> {
        match credential {
            Credential::Token(token) | Credential::Session(token) => Some(Auth::Query {
                name: "private_token".to_string(),
                value: token.clone(),
            }),
            Credential::OAuth(token) => Some(Auth::Query {
                name: "access_token".to_string(),
                value: token.clone(),
            }),
            Credential::Basic { .. } | Credential::Anonymous => None,
        }
    }

    fn decode(&self, kind: EntityKind, value: &Value, parents: &[EntityId]) -> Result<Entity> {
        let f = Fields::new(kind, value)?;
        let entity = match kind {
            EntityKind::Account => Entity::Account(account(&f)?),
            EntityKind::Project => Entity::Project(project(&f)?),
            EntityKind::Issue => Entity::Issue(issue(&f, parents)?),
            EntityKind::Milestone => Entity::Milestone(milestone(&f, parents)?),
            EntityKind::Label => Entity::Label(Label {
                id: Some(EntityId::Key(f.string("name")?)),
                project: parent(kind, parents, 0)?,
                name: f.string("name")?,
                color: f.opt_string("color")?,
                description: f.opt_string("description")?,
            }),
            EntityKind::Comment => Entity::Comment(comment(&f, parents)?),
            EntityKind::Group => Entity::Group(Group {
                id: Some(f.id("id")?),
                name: f.string("name")?,
                path: f.opt_string("path")?,
                description: f.opt_string("description")?,
                url: f.opt_string("web_url")?,
                members: Default::default(),
            }),
            EntityKind::Member => Entity::Member(Member {
                account: Some(f.id("id")?),
                group: parent(kind, parents, 0)?,
                name: f.opt_string("username")?,
                access_level: f.opt_u32("access_level")?,
            }),
        };
        Ok(entity)
    }

    fn encode(&self, entity: &Entity, previous: Option<&Entity>) -> Result<Value> {
        let creating = previous.is_none() && entity.id().is_none();
        let mut body = Map::new();
        match entity {
            Entity::Account(a) => {
                if creating && a.email.is_none() {
                    return Err(Error::Validation {
                        kind: EntityKind::Account,
                        field: "email",
                    });
                }
                body.insert("username".into(), json!(a.name));
                body.insert("name".into(), json!(a.fullname.as_deref().unwrap_or(&a.name)));
                put(&mut body, "email", a.email.as_ref())?;
                if creating {
                    put(&mut body, "password", a.password.as_ref())?;
                }
            }
            Entity::Project(p) => {
                body.insert("name".into(), json!(p.name));
                put(&mut body, "path", p.key.as_ref())?;
                put(&mut body, "description", p.description.as_ref())?;
                body.insert(
                    "visibility".into(),
                    json!(if p.public { "public" } else { "private" }),
                );
                if !p.tags.is_empty() {
                    body.insert("topics".into(), json!(p.tags));
                }
            }
            Entity::Issue(i) => {
                body.insert("title".into(), json!(i.name));
                put(&mut body, "description", i.description.as_ref())?;
                body.insert("labels".into(), json!(i.labels.join(",")));
                if let Some(assignee) = &i.assignee {
                    body.insert("assignee_ids".into(), json!([assignee.id]));
                }
                put(&mut body, "milestone_id", i.milestone.as_ref().map(|m| &m.id))?;
                let was = match previous {
                    Some(Entity::Issue(old)) => old.state,
                    _ => IssueState::Open,
                };
                match (was, i.state) {
                    (IssueState::Open, IssueState::Closed) => {
                        body.insert("state_event".into(), json!("close"));
                    }
                    (IssueState::Closed, IssueState::Open) => {
                        body.insert("state_event".into(), json!("reopen"));
                    }
                    _ => {}
                }
            }
            Entity::Milestone(m) => {
                body.insert("title".into(), json!(m.name));
                put(&mut body, "description", m.description.as_ref())?;
                put(&mut body, "due_date", m.due_date)?;
                let was = match previous {
                    Some(Entity::Milestone(old)) => old.state.as_deref(),
                    _ => None,
                };
                match (was, m.state.as_deref()) {
                    (Some("closed"), Some("active")) => {
                        body.insert("state_event".into(), json!("activate"));
                    }
                    (w, Some("closed")) if w != Some("closed") => {
                        body.insert("state_event".into(), json!("close"));
                    }
                    _ => {}
                }
            }
            Entity::Label(l) => {
                match previous {
                    Some(Entity::Label(old)) => {
                        if old.name != l.name {
                            body.insert("new_name".into(), json!(l.name));
                        }
                    }
                    _ => {
                        if l.color.is_none() {
                            return Err(Error::Validation {
                                kind: EntityKind::Label,
                                field: "color",
                            });
                        }
                        body.insert("name".into(), json!(l.name));
                    }
                }
                put(&mut body, "color", l.color.as_ref())?;
                put(&mut body, "description", l.description.as_ref())?;
            }
            Entity::Comment(c) => {
                body.insert("body".into(), json!(c.content));
            }
            Entity::Group(g) => {
                if creating && g.path.is_none() {
                    return Err(Error::Validation {
                        kind: EntityKind::Group,
                        field: "path",
                    });
                }
                body.insert("name".into(), json!(g.name));
                put(&mut body, "path", g.path.as_ref())?;
                put(&mut body, "description", g.description.as_ref())?;
            }
            Entity::Member(m) => {
                let account = m.account.as_ref().ok_or(Error::Validation {
                    kind: EntityKind::Member,
                    field: "account",
                })?;
                body.insert("user_id".into(), json!(account));
                body.insert(
                    "access_level".into(),
                    json!(m.access_level.unwrap_or(DEFAULT_ACCESS_LEVEL)),
                );
            }
        }
        Ok(Value::Object(body))
    }
}

fn user_ref(f: &Fields<'_>, key: &'static str) -> Result<Option<Reference>> {
    let Some(user) = f.opt_nested(key)? else {
        return Ok(None);
    };
    let mut reference = Reference::new(EntityKind::Account, user.id("id")?);
    reference.name = user.opt_string("username")?;
    Ok(Some(reference))
}

fn account(f: &Fields<'_>) -> Result<Account> {
    Ok(Account {
        id: Some(f.id("id")?),
        name: f.string("username")?,
        fullname: f.opt_string("name")?,
        email: f.opt_string("email")?,
        password: None,
        avatar: f.opt_string("avatar_url")?,
        state: f.opt_string("state")?,
        created: f.timestamp("created_at")?,
        updated: None,
    })
}

fn project(f: &Fields<'_>) -> Result<Project> {
    let mut tags = f.strings("topics")?;
    if tags.is_empty() {
        tags = f.strings("tag_list")?;
    }
    Ok(Project {
        id: Some(f.id("id")?),
        name: f.string("name")?,
        key: f.opt_string("path_with_namespace")?,
        description: f.opt_string("description")?,
        owner: user_ref(f, "owner")?,
        url: f.opt_string("web_url")?,
        avatar: f.opt_string("avatar_url")?,
        public: f.opt_string("visibility")?.as_deref() == Some("public"),
        archived: f.flag("archived")?,
        tags,
        created: f.timestamp("created_at")?,
        updated: f.timestamp("last_activity_at")?,
    })
}

fn issue(f: &Fields<'_>, parents: &[EntityId]) -> Result<Issue> {
    let project = match f.opt_id("project_id")? {
        Some(id) => id,
        None => parent(EntityKind::Issue, parents, 0)?,
    };
    let milestone = match f.opt_nested("milestone")? {
        Some(m) => Some(
            Reference::new(EntityKind::Milestone, m.id("id")?)
                .within(vec![project.clone()])
                .named(m.string("title")?),
        ),
        None => None,
    };
    let state = match f.string("state")?.as_str() {
        "closed" => IssueState::Closed,
        _ => IssueState::Open,
    };
    Ok(Issue {
        id: Some(f.id("iid")?),
        project,
        name: f.string("title")?,
        description: f.opt_string("description")?,
        state,
        labels: f.strings("labels")?,
        assignee: user_ref(f, "assignee")?,
        milestone,
        parent: None,
        owner: user_ref(f, "author")?,
        url: f.opt_string("web_url")?,
        created: f.timestamp("created_at")?,
        updated: f.timestamp("updated_at")?,
    })
}

fn milestone(f: &Fields<'_>, parents: &[EntityId]) -> Result<Milestone> {
    let project = match f.opt_id("project_id")? {
        Some(id) => id,
        None => parent(EntityKind::Milestone, parents, 0)?,
    };
    Ok(Milestone {
        id: Some(f.id("id")?),
        project,
        name: f.string("title")?,
        description: f.opt_string("description")?,
        state: f.opt_string("state")?,
        due_date: f.date("due_date")?,
        created: f.timestamp("created_at")?,
        updated: f.timestamp("updated_at")?,
    })
}

fn comment(f: &Fields<'_>, parents: &[EntityId]) -> Result<Comment> {
    let project = match f.opt_id("project_id")? {
        Some(id) => id,
        None => parent(EntityKind::Comment, parents, 0)?,
    };
    let issue = match f.opt_id("noteable_iid")? {
        Some(id) => id,
        None => parent(EntityKind::Comment, parents, 1)?,
    };
    Ok(Comment {
        id: Some(f.id("id")?),
        project,
        issue,
        content: f.string("body")?,
        attachment: f.opt_string("attachment")?,
        owner: user_ref(f, "author")?,
        created: f.timestamp("created_at")?,
        updated: f.timestamp("updated_at")?,
    })
}

#[cfg(test)]
#[path = "gitlab_tests.rs"]
mod tests;
