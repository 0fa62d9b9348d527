// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backend dialects.
//!
//! A [`Dialect`] knows how one remote API lays out its resources: the scope
//! chain of every entity kind, how an [`Address`] becomes a [`Request`], how
//! credentials are attached, how listings are paged, and how entities map to
//! and from the remote JSON.

mod github;
mod gitlab;
mod jira;

pub use github::GitHub;
pub use gitlab::GitLab;
pub use jira::Jira;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use ts_core::{Address, Entity, EntityId, EntityKind, ScopeChain};

use crate::error::{Error, Result};
use crate::session::Credential;
use crate::transport::{Auth, Request, Verb};

/// Supported remote backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Gitlab,
    Github,
    Jira,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Gitlab => "gitlab",
            Backend::Github => "github",
            Backend::Jira => "jira",
        }
    }

    /// Builds the dialect for this backend.
    pub fn dialect(&self, api_version: Option<&str>) -> Box<dyn Dialect> {
        match self {
            Backend::Gitlab => Box::new(GitLab::new(api_version)),
            Backend::Github => Box::new(GitHub::new()),
            Backend::Jira => Box::new(Jira::new(api_version)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gitlab" => Ok(Backend::Gitlab),
            "github" => Ok(Backend::Github),
            "jira" => Ok(Backend::Jira),
            _ => Err(Error::Config(format!(
                "unknown backend '{}'\n  hint: valid backends are: gitlab, github, jira",
                s
            ))),
        }
    }
}

/// How an entity is looked up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    /// The name is the id (labels, GitHub users and organizations).
    Identifier,
    /// A listing filtered server-side by the given query parameter.
    Search(&'static str),
    /// List the collection and compare names.
    Scan,
    /// The kind has no name (comments).
    Unsupported,
}

/// What came back from a create or update call.
#[derive(Debug, Clone, PartialEq)]
pub enum Written {
    /// The response held the full entity.
    Decoded(Entity),
    /// The response was empty or partial; fetch the entity with this id.
    Refetch(EntityId),
}

/// Per-backend addressing, naming, auth and field mapping.
pub trait Dialect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Path prepended to every request, e.g. `api/v4`.
    fn api_root(&self) -> String;

    /// Kinds this backend can store.
    fn kinds(&self) -> &'static [EntityKind];

    /// Logical scope chain of `kind`, one scope per lineage entry plus the
    /// target collection.
    fn scopes(&self, kind: EntityKind) -> ScopeChain;

    fn naming(&self, kind: EntityKind) -> Naming {
        match kind {
            EntityKind::Comment => Naming::Unsupported,
            EntityKind::Label => Naming::Identifier,
            _ => Naming::Scan,
        }
    }

    /// False for kinds that are closed instead of deleted.
    fn hard_delete(&self, _kind: EntityKind) -> bool {
        true
    }

    /// Request for one entity. `None` means the backend has no item route
    /// and the collection must be scanned.
    fn fetch(&self, address: &Address) -> Result<Option<Request>>;

    /// Request for one entity when its parents are unknown, for backends
    /// whose ids are unique without them.
    fn fetch_unscoped(&self, _kind: EntityKind, _id: &EntityId) -> Option<Request> {
        None
    }

    /// Request listing the collection at `address`.
    fn list(&self, address: &Address) -> Result<Request>;

    fn create(&self, address: &Address, entity: &Entity, body: Value) -> Result<Request>;

    fn modify(&self, address: &Address, entity: &Entity, body: Value) -> Result<Request>;

    fn delete(&self, address: &Address, entity: &Entity) -> Result<Request>;

    /// Applies paging to a listing request. `after` is the last item of the
    /// previous page, for cursor-paged collections. Returns false when the
    /// listing of `kind` is not paged, in which case the request is sent once.
    fn paginate(
        &self,
        kind: EntityKind,
        request: &mut Request,
        page: usize,
        after: Option<&Value>,
        size: usize,
    ) -> bool;

    /// Largest page the remote serves; bigger requests come back short.
    fn max_page_size(&self) -> usize {
        100
    }

    /// Whether a listed item belongs to the `kind` collection. Items are
    /// dropped after the page length is counted.
    fn keep(&self, _kind: EntityKind, _item: &Value) -> bool {
        true
    }

    /// Unwraps the item array from a listing response.
    fn items(&self, kind: EntityKind, value: Value) -> Result<Vec<Value>> {
        match value {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            _ => Err(ts_core::ConversionError::invalid(kind, "<root>", "a list").into()),
        }
    }

    /// The cheapest authenticated call, returning the current account.
    fn whoami(&self) -> Request;

    /// Session login call, for backends that exchange a password for a token.
    fn login(&self, _user: &str, _password: &str) -> Option<Request> {
        None
    }

    /// Extracts the token from a login response.
    fn session_token(&self, _response: &Value) -> Result<String> {
        Err(Error::Unsupported {
            backend: self.name(),
            kind: EntityKind::Account,
            operation: "log in",
        })
    }

    fn authorize(&self, credential: &Credential) -> Option<Auth>;

    /// Builds an entity of `kind` from a response object. `parents` are the
    /// ids the request was addressed with; they fill in whatever the payload
    /// does not carry.
    fn decode(&self, kind: EntityKind, value: &Value, parents: &[EntityId]) -> Result<Entity>;

    /// Interprets the response to a create or update of `entity`.
    fn decode_written(&self, entity: &Entity, value: &Value) -> Result<Written> {
        if value.is_null() {
            return entity
                .id()
                .cloned()
                .map(Written::Refetch)
                .ok_or_else(|| Error::Addressing {
                    kind: entity.kind(),
                    reason: "the remote returned no body and the entity has no id".to_string(),
                });
        }
        self.decode(entity.kind(), value, &entity.parents())
            .map(Written::Decoded)
    }

    /// Request body for creating or updating `entity`. `previous` is the
    /// remote state being replaced, when known.
    fn encode(&self, entity: &Entity, previous: Option<&Entity>) -> Result<Value>;
}

impl fmt::Debug for dyn Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dialect({})", self.name())
    }
}

/// Request at `address` with the given verb, scopes taken from the chain.
pub(crate) fn at(verb: Verb, address: &Address) -> Request {
    let mut request =
        Request::new(verb, address.chain().scopes().to_vec()).with_parents(address.parents().to_vec());
    request.id = address.id().cloned();
    request
}

/// The target id of an item address.
pub(crate) fn target(address: &Address) -> Result<&EntityId> {
    address.id().ok_or_else(|| Error::Addressing {
        kind: address.kind(),
        reason: format!("'{}' has no target id", address),
    })
}

/// Parent id at `index`, or an addressing error.
pub(crate) fn parent(kind: EntityKind, parents: &[EntityId], index: usize) -> Result<EntityId> {
    parents.get(index).cloned().ok_or_else(|| Error::Addressing {
        kind,
        reason: format!("missing parent id #{}", index + 1),
    })
}

pub(crate) fn unsupported(backend: &'static str, kind: EntityKind, operation: &'static str) -> Error {
    Error::Unsupported {
        backend,
        kind,
        operation,
    }
}

/// Page-number paging shared by GitLab and GitHub.
pub(crate) fn page_number(request: &mut Request, page: usize, size: usize) {
    request.set_param("page", (page + 1).to_string());
    request.set_param("per_page", size.to_string());
}

/// Inserts `value` under `key` unless it is `None`.
pub(crate) fn put<T: Serialize>(body: &mut serde_json::Map<String, Value>, key: &str, value: Option<T>) -> Result<()> {
    if let Some(value) = value {
        body.insert(key.to_string(), serde_json::to_value(value)?);
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
