// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Search criteria for `find`.
//!
//! A query optionally pins the parent ids and carries field criteria. All
//! criteria must hold (AND). Criteria are matched against the serialized
//! entity, so field names are the entity's own (`name`, `state`, `labels`,
//! `owner.id`, ...). Array fields match when any element matches, and scalars
//! are compared by their textual form so `"42"` matches `42`.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::entity::Entity;
use crate::id::EntityId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Explicit parent ids. `None` means the parents must be discovered.
    pub parents: Option<Vec<EntityId>>,
    pub criteria: BTreeMap<String, Value>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn within(mut self, parents: Vec<EntityId>) -> Self {
        self.parents = Some(parents);
        self
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.criteria.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// The `name` criterion, when it is a plain string.
    pub fn name(&self) -> Option<&str> {
        self.criteria.get("name").and_then(Value::as_str)
    }

    pub fn matches(&self, entity: &Entity) -> bool {
        if self.criteria.is_empty() {
            return true;
        }
        let Ok(fields) = entity.to_value() else {
            return false;
        };
        self.criteria
            .iter()
            .all(|(path, expected)| lookup(&fields, path).is_some_and(|actual| matches_value(actual, expected)))
    }
}

fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

fn matches_value(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Array(items), Value::Array(wanted)) => wanted
            .iter()
            .all(|w| items.iter().any(|item| matches_value(item, w))),
        (Value::Array(items), _) => items.iter().any(|item| matches_value(item, expected)),
        (Value::Object(fields), Value::Object(wanted)) => wanted.iter().all(|(key, w)| {
            fields
                .get(key)
                .is_some_and(|field| matches_value(field, w))
        }),
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ => match (scalar_text(actual), scalar_text(expected)) {
            (Some(a), Some(e)) => a == e,
            _ => actual == expected,
        },
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
