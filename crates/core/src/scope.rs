// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scope chains and resolved addresses.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::id::{EntityId, GlobalId};
use crate::kind::EntityKind;

/// Ordered collection names from the root down to the target collection,
/// e.g. `["projects", "issues", "notes"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeChain(Vec<String>);

impl ScopeChain {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScopeChain(scopes.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn scopes(&self) -> &[String] {
        &self.0
    }

    /// The collection holding the target entity.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl fmt::Display for ScopeChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// A fully resolved location: the scope chain, one id per parent scope and
/// optionally the target id (absent when addressing a whole collection).
///
/// Invariant: `parents.len() == chain.len() - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    kind: EntityKind,
    chain: ScopeChain,
    parents: Vec<EntityId>,
    id: Option<EntityId>,
}

impl Address {
    /// Builds an address, checking the chain against the parent ids.
    pub fn new(
        kind: EntityKind,
        chain: ScopeChain,
        parents: Vec<EntityId>,
        id: Option<EntityId>,
    ) -> Result<Self> {
        if chain.is_empty() {
            return Err(Error::Addressing {
                kind,
                reason: "empty scope chain".to_string(),
            });
        }
        if parents.len() + 1 != chain.len() {
            return Err(Error::Addressing {
                kind,
                reason: format!(
                    "scope chain '{}' needs {} parent id(s), got {}",
                    chain,
                    chain.len() - 1,
                    parents.len()
                ),
            });
        }
        Ok(Address {
            kind,
            chain,
            parents,
            id,
        })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn chain(&self) -> &ScopeChain {
        &self.chain
    }

    pub fn parents(&self) -> &[EntityId] {
        &self.parents
    }

    pub fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    /// The same location without a target id.
    pub fn collection(&self) -> Address {
        Address {
            kind: self.kind,
            chain: self.chain.clone(),
            parents: self.parents.clone(),
            id: None,
        }
    }

    /// The global id of the addressed entity, if it has one.
    pub fn global_id(&self) -> Option<GlobalId> {
        self.id
            .clone()
            .map(|id| GlobalId::new(id, self.parents.clone()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scopes = self.chain.scopes();
        for (i, scope) in scopes.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", scope)?;
            if let Some(parent) = self.parents.get(i) {
                write!(f, "/{}", parent)?;
            }
        }
        if let Some(id) = &self.id {
            write!(f, "/{}", id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
