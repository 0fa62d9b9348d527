// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entity identifiers and global ids.
//!
//! Backends identify objects with integers (GitLab ids, GitHub issue numbers),
//! strings (label names, Jira keys) or path-like strings (`owner/repo`). An
//! [`EntityId`] holds either form. A [`GlobalId`] packs an id together with
//! its full parent chain into one string:
//!
//! ```text
//! 7/42/3          comment 3 of issue 42 in project 7
//! ~acme%2Fweb/12  issue 12 in project "acme/web"
//! ```
//!
//! Numeric ids are written as decimal digits. Textual ids are prefixed with
//! `~` and have `%` and `/` percent-escaped, so `/` only ever separates
//! segments and a key that looks like a number stays a key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const KEY_MARKER: char = '~';
const SEPARATOR: char = '/';

/// A backend-native identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Num(u64),
    Key(String),
}

impl EntityId {
    /// Infers the id form from user input: all digits is numeric, anything
    /// else is a key.
    pub fn parse(s: &str) -> EntityId {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse::<u64>() {
                return EntityId::Num(n);
            }
        }
        EntityId::Key(s.to_string())
    }

    pub fn as_num(&self) -> Option<u64> {
        match self {
            EntityId::Num(n) => Some(*n),
            EntityId::Key(_) => None,
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            EntityId::Num(_) => None,
            EntityId::Key(k) => Some(k),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Num(n) => write!(f, "{}", n),
            EntityId::Key(k) => write!(f, "{}", k),
        }
    }
}

impl From<u64> for EntityId {
    fn from(n: u64) -> Self {
        EntityId::Num(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Key(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Key(s)
    }
}

/// An id plus the ids of every parent from the root down.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalId {
    pub id: EntityId,
    pub parents: Vec<EntityId>,
}

impl GlobalId {
    pub fn new(id: EntityId, parents: Vec<EntityId>) -> Self {
        GlobalId { id, parents }
    }

    /// Encodes this id to its textual form.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for parent in &self.parents {
            encode_segment(parent, &mut out);
            out.push(SEPARATOR);
        }
        encode_segment(&self.id, &mut out);
        out
    }

    /// Decodes the textual form produced by [`GlobalId::encode`].
    pub fn decode(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(invalid(input, "empty global id"));
        }
        let mut ids = input
            .split(SEPARATOR)
            .map(|segment| decode_segment(segment, input))
            .collect::<Result<Vec<_>>>()?;
        // split() always yields at least one segment
        let id = ids
            .pop()
            .ok_or_else(|| invalid(input, "no id segment"))?;
        Ok(GlobalId { id, parents: ids })
    }

    pub fn into_parts(self) -> (EntityId, Vec<EntityId>) {
        (self.id, self.parents)
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for GlobalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GlobalId::decode(s)
    }
}

/// Splits a global name (`project/issue title`) into its segments, root first.
///
/// Segments use global id escaping. The `~` marker is optional since every
/// segment of a name is text.
pub fn split_global_name(input: &str) -> Result<Vec<String>> {
    if input.is_empty() {
        return Err(invalid(input, "empty global name"));
    }
    input
        .split(SEPARATOR)
        .map(|segment| {
            let segment = segment.strip_prefix(KEY_MARKER).unwrap_or(segment);
            if segment.is_empty() {
                return Err(invalid(input, "empty segment"));
            }
            unescape(segment, input)
        })
        .collect()
}

fn encode_segment(id: &EntityId, out: &mut String) {
    match id {
        EntityId::Num(n) => out.push_str(&n.to_string()),
        EntityId::Key(k) => {
            out.push(KEY_MARKER);
            for c in k.chars() {
                match c {
                    '%' => out.push_str("%25"),
                    '/' => out.push_str("%2F"),
                    c => out.push(c),
                }
            }
        }
    }
}

fn decode_segment(segment: &str, input: &str) -> Result<EntityId> {
    if let Some(escaped) = segment.strip_prefix(KEY_MARKER) {
        return unescape(escaped, input).map(EntityId::Key);
    }
    if segment.is_empty() {
        return Err(invalid(input, "empty segment"));
    }
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(
            input,
            &format!("segment '{}' is neither a number nor a ~key", segment),
        ));
    }
    segment
        .parse::<u64>()
        .map(EntityId::Num)
        .map_err(|_| invalid(input, &format!("segment '{}' overflows", segment)))
}

fn unescape(escaped: &str, input: &str) -> Result<String> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let code: String = chars.by_ref().take(2).collect();
        match code.as_str() {
            "25" => out.push('%'),
            "2F" | "2f" => out.push('/'),
            _ => return Err(invalid(input, &format!("bad escape '%{}'", code))),
        }
    }
    Ok(out)
}

fn invalid(input: &str, reason: &str) -> Error {
    Error::InvalidGlobalId {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
