// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed field extraction from remote JSON payloads.
//!
//! Every failure is a [`ConversionError`] naming the entity kind and the key,
//! so a changed remote schema surfaces as a conversion failure rather than as
//! a silently missing entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::error::{ConversionError, Result};
use crate::id::EntityId;
use crate::kind::EntityKind;

/// A view over one JSON object being decoded as `kind`.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'v> {
    kind: EntityKind,
    object: &'v Value,
    prefix: Option<&'v str>,
}

impl<'v> Fields<'v> {
    pub fn new(kind: EntityKind, value: &'v Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ConversionError::invalid(kind, "<root>", "an object").into());
        }
        Ok(Fields {
            kind,
            object: value,
            prefix: None,
        })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Raw value at a dotted path. JSON `null` reads as absent.
    pub fn get(&self, path: &str) -> Option<&'v Value> {
        path.split('.')
            .try_fold(self.object, |current, key| current.get(key))
            .filter(|v| !v.is_null())
    }

    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// An id that may be numeric or textual.
    pub fn id(&self, path: &str) -> Result<EntityId> {
        self.opt_id(path)?.ok_or_else(|| self.missing(path))
    }

    pub fn opt_id(&self, path: &str) -> Result<Option<EntityId>> {
        match self.get(path) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(|n| Some(EntityId::Num(n)))
                .ok_or_else(|| self.invalid(path, "a non-negative integer")),
            Some(Value::String(s)) => Ok(Some(EntityId::parse(s))),
            Some(_) => Err(self.invalid(path, "an id")),
        }
    }

    /// Like [`Fields::id`] but never turns numeric-looking strings into numbers.
    pub fn key(&self, path: &str) -> Result<EntityId> {
        match self.get(path) {
            Some(Value::String(s)) => Ok(EntityId::Key(s.clone())),
            Some(Value::Number(_)) => self.id(path),
            Some(_) => Err(self.invalid(path, "a key")),
            None => Err(self.missing(path)),
        }
    }

    pub fn string(&self, path: &str) -> Result<String> {
        self.opt_string(path)?.ok_or_else(|| self.missing(path))
    }

    pub fn opt_string(&self, path: &str) -> Result<Option<String>> {
        match self.get(path) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(path, "a string")),
        }
    }

    pub fn flag(&self, path: &str) -> Result<bool> {
        match self.get(path) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(self.invalid(path, "a boolean")),
        }
    }

    pub fn opt_u32(&self, path: &str) -> Result<Option<u32>> {
        match self.get(path) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.invalid(path, "a small integer")),
        }
    }

    /// RFC 3339 timestamps, plus the `+0000` offset form some APIs emit.
    pub fn timestamp(&self, path: &str) -> Result<Option<DateTime<Utc>>> {
        let Some(text) = self.opt_string(path)? else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(&text)
            .or_else(|_| DateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f%z"))
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| self.invalid(path, "a timestamp"))
    }

    pub fn date(&self, path: &str) -> Result<Option<NaiveDate>> {
        let Some(text) = self.opt_string(path)? else {
            return Ok(None);
        };
        NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| self.invalid(path, "a date"))
    }

    /// A list of strings. Objects in the list contribute their `name`.
    pub fn strings(&self, path: &str) -> Result<Vec<String>> {
        match self.get(path) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Object(o) => o
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .ok_or_else(|| self.invalid(path, "a list of names")),
                    _ => Err(self.invalid(path, "a list of strings")),
                })
                .collect(),
            Some(_) => Err(self.invalid(path, "a list")),
        }
    }

    /// A nested object, decoded with errors reported under the same kind.
    pub fn nested(&self, path: &'v str) -> Result<Fields<'v>> {
        self.opt_nested(path)?.ok_or_else(|| self.missing(path))
    }

    pub fn opt_nested(&self, path: &'v str) -> Result<Option<Fields<'v>>> {
        match self.get(path) {
            None => Ok(None),
            Some(v) if v.is_object() => Ok(Some(Fields {
                kind: self.kind,
                object: v,
                prefix: Some(path),
            })),
            Some(_) => Err(self.invalid(path, "an object")),
        }
    }

    fn full_key(&self, path: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{}.{}", prefix, path),
            None => path.to_string(),
        }
    }

    fn missing(&self, path: &str) -> crate::error::Error {
        ConversionError::missing(self.kind, &self.full_key(path)).into()
    }

    fn invalid(&self, path: &str, expected: &str) -> crate::error::Error {
        ConversionError::invalid(self.kind, &self.full_key(path), expected).into()
    }
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
