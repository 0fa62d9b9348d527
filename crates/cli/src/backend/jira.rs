// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Jira REST API (v2).
//!
//! Projects are identified by key, issues by issue key. Issues, comments and
//! versions have item routes that omit their project, issues are listed
//! through a JQL search, and groups take their name as a query parameter.
//! Jira has no labels collection.

use serde_json::{json, Map, Value};
use ts_core::{
    Account, Address, Comment, ConversionError, Entity, EntityId, EntityKind, Fields, Group, Issue,
    IssueState, Member, Milestone, Project, Reference, ScopeChain,
};

use super::{parent, put, target, unsupported, Dialect, Naming, Written};
use crate::error::{Error, Result};
use crate::session::Credential;
use crate::transport::{Auth, Request, Verb};

const NAME: &str = "jira";

const KINDS: &[EntityKind] = &[
    EntityKind::Account,
    EntityKind::Project,
    EntityKind::Issue,
    EntityKind::Milestone,
    EntityKind::Comment,
    EntityKind::Group,
    EntityKind::Member,
];

const DEFAULT_ISSUE_TYPE: &str = "Task";

#[derive(Debug, Clone)]
pub struct Jira {
    version: String,
}

impl Jira {
    pub fn new(api_version: Option<&str>) -> Self {
        Jira {
            version: api_version.unwrap_or("2").to_string(),
        }
    }
}

fn key_text(id: &EntityId) -> String {
    id.to_string()
}

fn group_request(verb: Verb, scope: &str, group: &EntityId) -> Request {
    Request::new(verb, [scope]).with_param("groupname", key_text(group))
}

impl Dialect for Jira {
    fn name(&self) -> &'static str {
        NAME
    }

    fn api_root(&self) -> String {
        format!("rest/api/{}", self.version)
    }

    fn kinds(&self) -> &'static [EntityKind] {
        KINDS
    }

    fn scopes(&self, kind: EntityKind) -> ScopeChain {
        match kind {
            EntityKind::Account => ScopeChain::new(["user"]),
            EntityKind::Project => ScopeChain::new(["project"]),
            EntityKind::Issue => ScopeChain::new(["project", "issue"]),
            EntityKind::Milestone => ScopeChain::new(["project", "version"]),
            EntityKind::Label => ScopeChain::new(["project", "label"]),
            EntityKind::Comment => ScopeChain::new(["project", "issue", "comment"]),
            EntityKind::Group => ScopeChain::new(["group"]),
            EntityKind::Member => ScopeChain::new(["group", "member"]),
        }
    }

    fn naming(&self, kind: EntityKind) -> Naming {
        match kind {
            EntityKind::Account | EntityKind::Group | EntityKind::Member => Naming::Identifier,
            EntityKind::Project | EntityKind::Issue | EntityKind::Milestone => Naming::Scan,
            EntityKind::Label | EntityKind::Comment => Naming::Unsupported,
        }
    }

    fn fetch(&self, address: &Address) -> Result<Option<Request>> {
        let id = target(address)?.clone();
        let kind = address.kind();
        let request = match kind {
            EntityKind::Account => Request::get(["user"]).with_param("username", key_text(&id)),
            EntityKind::Project => Request::get(["project"]).with_id(id),
            EntityKind::Issue => Request::get(["issue"]).with_id(id),
            EntityKind::Milestone => Request::get(["version"]).with_id(id),
            EntityKind::Comment => Request::get(["issue", "comment"])
                .with_parents(vec![parent(kind, address.parents(), 1)?])
                .with_id(id),
            EntityKind::Group => group_request(Verb::Get, "group", &id),
            EntityKind::Member => return Ok(None),
            EntityKind::Label => return Err(unsupported(NAME, kind, "fetch")),
        };
        Ok(Some(request))
    }

    fn fetch_unscoped(&self, kind: EntityKind, id: &EntityId) -> Option<Request> {
        match kind {
            EntityKind::Issue => Some(Request::get(["issue"]).with_id(id.clone())),
            EntityKind::Milestone => Some(Request::get(["version"]).with_id(id.clone())),
            _ => None,
        }
    }

    fn list(&self, address: &Address) -> Result<Request> {
        let kind = address.kind();
        let parents = address.parents();
        let request = match kind {
            EntityKind::Account => Request::get(["user", "search"]).with_param("username", "."),
            EntityKind::Project => Request::get(["project"]),
            EntityKind::Issue => {
                let project = parent(kind, parents, 0)?;
                Request::get(["search"])
                    .with_param("jql", format!("project = \"{}\" ORDER BY key ASC", project))
            }
            EntityKind::Milestone => Request::get(["project", "versions"])
                .with_parents(vec![parent(kind, parents, 0)?]),
            EntityKind::Comment => Request::get(["issue", "comment"])
                .with_parents(vec![parent(kind, parents, 1)?]),
            EntityKind::Group => Request::get(["groups", "picker"]),
            EntityKind::Member => group_request(Verb::Get, "group/member", &parent(kind, parents, 0)?),
            EntityKind::Label => return Err(unsupported(NAME, kind, "list")),
        };
        Ok(request)
    }

    fn create(&self, address: &Address, entity: &Entity, body: Value) -> Result<Request> {
        let kind = address.kind();
        let request = match kind {
            EntityKind::Account => Request::post(["user"]),
            EntityKind::Project => Request::post(["project"]),
            EntityKind::Issue => Request::post(["issue"]),
            EntityKind::Milestone => Request::post(["version"]),
            EntityKind::Comment => Request::post(["issue", "comment"])
                .with_parents(vec![parent(kind, address.parents(), 1)?]),
            EntityKind::Group => Request::post(["group"]),
            EntityKind::Member => {
                group_request(Verb::Post, "group/user", &parent(kind, address.parents(), 0)?)
            }
            EntityKind::Label => return Err(unsupported(NAME, entity.kind(), "create")),
        };
        Ok(request.with_body(body))
    }

    fn modify(&self, address: &Address, _entity: &Entity, body: Value) -> Result<Request> {
        match address.kind() {
            EntityKind::Group | EntityKind::Member | EntityKind::Label => {
                Err(unsupported(NAME, address.kind(), "update"))
            }
            _ => Ok(self
                .fetch(address)?
                .ok_or_else(|| unsupported(NAME, address.kind(), "update"))?
                .with_verb(Verb::Put)
                .with_body(body)),
        }
    }

    fn delete(&self, address: &Address, _entity: &Entity) -> Result<Request> {
        let kind = address.kind();
        match kind {
            EntityKind::Member => {
                let account = target(address)?;
                Ok(
                    group_request(Verb::Delete, "group/user", &parent(kind, address.parents(), 0)?)
                        .with_param("username", key_text(account)),
                )
            }
            EntityKind::Label => Err(unsupported(NAME, kind, "delete")),
            _ => Ok(self
                .fetch(address)?
                .ok_or_else(|| unsupported(NAME, kind, "delete"))?
                .with_verb(Verb::Delete)),
        }
    }

    fn paginate(
        &self,
        kind: EntityKind,
        request: &mut Request,
        page: usize,
        _after: Option<&Value>,
        size: usize,
    ) -> bool {
        match kind {
            EntityKind::Account | EntityKind::Issue | EntityKind::Comment | EntityKind::Member => {
                request.set_param("startAt", (page * size).to_string());
                request.set_param("maxResults", size.to_string());
                true
            }
            _ => false,
        }
    }

    fn max_page_size(&self) -> usize {
        50
    }

    fn items(&self, kind: EntityKind, value: Value) -> Result<Vec<Value>> {
        let key = match kind {
            EntityKind::Issue => Some("issues"),
            EntityKind::Comment => Some("comments"),
            EntityKind::Member => Some("values"),
            EntityKind::Group => Some("groups"),
            _ => None,
        };
        let items = match (key, value) {
            (Some(key), Value::Object(mut object)) => object
                .remove(key)
                .ok_or_else(|| Error::from(ConversionError::missing(kind, key)))?,
            (_, other) => other,
        };
        match items {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            _ => Err(ConversionError::invalid(kind, key.unwrap_or("<root>"), "a list").into()),
        }
    }

    fn whoami(&self) -> Request {
        Request::get(["myself"])
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
                id: Some(f.key("name")?),
                name: f.string("name")?,
                fullname: f.opt_string("displayName")?,
                email: f.opt_string("emailAddress")?,
                password: None,
                avatar: f.opt_string("avatarUrls.48x48")?,
                state: f.get("active").and_then(Value::as_bool).map(|active| {
                    if active { "active" } else { "inactive" }.to_string()
                }),
                created: None,
                updated: None,
            }),
            EntityKind::Project => Entity::Project(Project {
                id: Some(f.key("key")?),
                name: f.string("name")?,
                key: f.opt_string("key")?,
                description: f.opt_string("description")?,
                owner: user_ref(&f, "lead")?,
                url: f.opt_string("url")?,
                avatar: f.opt_string("avatarUrls.48x48")?,
                public: false,
                archived: f.flag("archived")?,
                tags: f
                    .opt_string("projectCategory.name")?
                    .into_iter()
                    .collect(),
                created: None,
                updated: None,
            }),
            EntityKind::Issue => Entity::Issue(issue(&f, parents)?),
            EntityKind::Milestone => Entity::Milestone(Milestone {
                id: Some(f.id("id")?),
                // projects are keyed by project key; the numeric projectId
                // is only a fallback for unscoped fetches
                project: match parents.first() {
                    Some(project) => project.clone(),
                    None => f.id("projectId")?,
                },
                name: f.string("name")?,
                description: f.opt_string("description")?,
                state: Some(
                    if f.flag("archived")? {
                        "archived"
                    } else if f.flag("released")? {
                        "released"
                    } else {
                        "unreleased"
                    }
                    .to_string(),
                ),
                due_date: f.date("releaseDate")?,
                created: None,
                updated: None,
            }),
            EntityKind::Comment => Entity::Comment(Comment {
                id: Some(f.id("id")?),
                project: parent(kind, parents, 0)?,
                issue: parent(kind, parents, 1)?,
                content: f.string("body")?,
                attachment: None,
                owner: user_ref(&f, "author")?,
                created: f.timestamp("created")?,
                updated: f.timestamp("updated")?,
            }),
            EntityKind::Group => Entity::Group(Group {
                id: Some(f.key("name")?),
                name: f.string("name")?,
                path: None,
                description: None,
                url: f.opt_string("self")?,
                members: Default::default(),
            }),
            EntityKind::Member => Entity::Member(Member {
                account: Some(f.key("name")?),
                group: parent(kind, parents, 0)?,
                name: f.opt_string("name")?,
                access_level: None,
            }),
            EntityKind::Label => return Err(unsupported(NAME, kind, "decode")),
        };
        Ok(entity)
    }

    fn decode_written(&self, entity: &Entity, value: &Value) -> Result<Written> {
        match entity {
            // create answers with {id, key, self}; updates answer with nothing
            Entity::Issue(_) if value.get("fields").is_none() => {
                let id = match value.get("key").and_then(Value::as_str) {
                    Some(key) => EntityId::Key(key.to_string()),
                    None => entity.id().cloned().ok_or(Error::Addressing {
                        kind: EntityKind::Issue,
                        reason: "the remote returned no issue key".to_string(),
                    })?,
                };
                Ok(Written::Refetch(id))
            }
            // adding a user answers with the whole group
            Entity::Member(member) if !value.is_null() => Ok(Written::Decoded(Entity::Member(
                Member {
                    name: member.account.as_ref().map(ToString::to_string),
                    ..member.clone()
                },
            ))),
            _ if value.is_null() => entity
                .id()
                .cloned()
                .map(Written::Refetch)
                .ok_or_else(|| Error::Addressing {
                    kind: entity.kind(),
                    reason: "the remote returned no body and the entity has no id".to_string(),
                }),
            _ => self
                .decode(entity.kind(), value, &entity.parents())
                .map(Written::Decoded),
        }
    }

    fn encode(&self, entity: &Entity, previous: Option<&Entity>) -> Result<Value> {
        let creating = previous.is_none() && entity.id().is_none();
        let mut body = Map::new();
        match entity {
            Entity::Account(a) => {
                body.insert("name".into(), json!(a.name));
                put(&mut body, "displayName", a.fullname.as_ref())?;
                put(&mut body, "emailAddress", a.email.as_ref())?;
                if creating {
                    if a.email.is_none() {
                        return Err(Error::Validation {
                            kind: EntityKind::Account,
                            field: "email",
                        });
                    }
                    put(&mut body, "password", a.password.as_ref())?;
                }
            }
            Entity::Project(p) => {
                body.insert("name".into(), json!(p.name));
                put(&mut body, "description", p.description.as_ref())?;
                if creating {
                    let key = p.key.as_ref().ok_or(Error::Validation {
                        kind: EntityKind::Project,
                        field: "key",
                    })?;
                    let owner = p.owner.as_ref().ok_or(Error::Validation {
                        kind: EntityKind::Project,
                        field: "owner",
                    })?;
                    body.insert("key".into(), json!(key));
                    body.insert("lead".into(), json!(owner.id.to_string()));
                    body.insert("projectTypeKey".into(), json!("software"));
                }
            }
            Entity::Issue(i) => {
                let mut fields = Map::new();
                if creating {
                    fields.insert("project".into(), json!({ "key": i.project.to_string() }));
                    fields.insert("issuetype".into(), json!({ "name": DEFAULT_ISSUE_TYPE }));
                }
                fields.insert("summary".into(), json!(i.name));
                put(&mut fields, "description", i.description.as_ref())?;
                fields.insert("labels".into(), json!(i.labels));
                if let Some(assignee) = &i.assignee {
                    fields.insert("assignee".into(), json!({ "name": assignee.id.to_string() }));
                }
                if let Some(milestone) = &i.milestone {
                    fields.insert("fixVersions".into(), json!([{ "id": milestone.id.to_string() }]));
                }
                if let Some(parent) = &i.parent {
                    fields.insert("parent".into(), json!({ "key": parent.id.to_string() }));
                }
                body.insert("fields".into(), Value::Object(fields));
            }
            Entity::Milestone(m) => {
                body.insert("name".into(), json!(m.name));
                put(&mut body, "description", m.description.as_ref())?;
                put(&mut body, "releaseDate", m.due_date)?;
                if creating {
                    body.insert("project".into(), json!(m.project.to_string()));
                }
                match m.state.as_deref() {
                    Some("released") => {
                        body.insert("released".into(), json!(true));
                    }
                    Some("archived") => {
                        body.insert("archived".into(), json!(true));
                    }
                    Some("unreleased") => {
                        body.insert("released".into(), json!(false));
                    }
                    _ => {}
                }
            }
            Entity::Comment(c) => {
                body.insert("body".into(), json!(c.content));
            }
            Entity::Group(g) => {
                body.insert("name".into(), json!(g.name));
            }
            Entity::Member(m) => {
                let account = m.account.as_ref().ok_or(Error::Validation {
                    kind: EntityKind::Member,
                    field: "account",
                })?;
                body.insert("name".into(), json!(account.to_string()));
            }
            Entity::Label(_) => return Err(unsupported(NAME, EntityKind::Label, "write")),
        }
        Ok(Value::Object(body))
    }
}

fn user_ref(f: &Fields<'_>, key: &'static str) -> Result<Option<Reference>> {
    let Some(user) = f.opt_nested(key)? else {
        return Ok(None);
    };
    let name = user.string("name")?;
    Ok(Some(
        Reference::new(EntityKind::Account, EntityId::Key(name.clone())).named(name),
    ))
}

fn issue(f: &Fields<'_>, parents: &[EntityId]) -> Result<Issue> {
    let fields = f.nested("fields")?;
    let project = match fields.opt_nested("project")? {
        Some(p) => p.key("key")?,
        None => parent(EntityKind::Issue, parents, 0)?,
    };
    let milestone = match fields.get("fixVersions").and_then(Value::as_array) {
        Some(versions) => match versions.first() {
            Some(version) => {
                let v = Fields::new(EntityKind::Issue, version)?;
                Some(
                    Reference::new(EntityKind::Milestone, v.id("id")?)
                        .within(vec![project.clone()])
                        .named(v.string("name")?),
                )
            }
            None => None,
        },
        None => None,
    };
    let parent_issue = match fields.opt_nested("parent")? {
        Some(p) => Some(
            Reference::new(EntityKind::Issue, p.key("key")?).within(vec![project.clone()]),
        ),
        None => None,
    };
    let state = match fields.opt_string("status.statusCategory.key")?.as_deref() {
        Some("done") => IssueState::Closed,
        _ => IssueState::Open,
    };
    Ok(Issue {
        id: Some(f.key("key")?),
        project,
        name: fields.string("summary")?,
        description: fields.opt_string("description")?,
        state,
        labels: fields.strings("labels")?,
        assignee: user_ref(&fields, "assignee")?,
        milestone,
        parent: parent_issue,
        owner: user_ref(&fields, "reporter")?,
        url: f.opt_string("self")?,
        created: fields.timestamp("created")?,
        updated: fields.timestamp("updated")?,
    })
}

#[cfg(test)]
#[path = "jira_tests.rs"]
mod tests;
