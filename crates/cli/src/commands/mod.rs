// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod create;
pub mod delete;
pub mod find;
pub mod get;
pub mod status;
pub mod update;

use serde_json::Value;
use std::io::Write;
use std::path::Path;
use ts_core::{Entity, EntityId, EntityKind, GlobalId};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::display::{format_entity_details, format_entity_line};
use crate::error::{Error, Result};
use crate::store::Store;

/// Helper to open a store from the configuration in effect.
pub fn open_store(config: Option<&Path>) -> Result<Store> {
    let config = Config::resolve(config)?;
    Store::from_config(&config)
}

pub(crate) fn parse_kind(kind: &str) -> Result<EntityKind> {
    Ok(kind.parse::<EntityKind>()?)
}

pub(crate) fn parse_ids(values: &[String]) -> Vec<EntityId> {
    values.iter().map(|v| EntityId::parse(v)).collect()
}

/// Parses `--data`, which must be a JSON object.
pub(crate) fn parse_data(data: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(data).map_err(|e| Error::InvalidArgument {
        arg: "--data".to_string(),
        reason: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(Error::InvalidArgument {
            arg: "--data".to_string(),
            reason: "expected a JSON object".to_string(),
        });
    }
    Ok(value)
}

/// How the entity to act on is named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// An id plus parent ids, root first.
    Id { id: String, parents: Vec<String> },
    /// A global id: parent ids and id joined by `/`.
    Global(String),
    /// A name plus parent names, root first.
    Name { name: String, parents: Vec<String> },
}

pub(crate) fn lookup(store: &Store, kind: EntityKind, lookup: &Lookup) -> Result<Entity> {
    match lookup {
        Lookup::Id { id, parents } => store.get(kind, &EntityId::parse(id), &parse_ids(parents)),
        Lookup::Global(gid) => store.get_global(kind, &GlobalId::decode(gid)?),
        Lookup::Name { name, parents } => store.get_by_name(kind, name, parents),
    }
}

pub(crate) fn print_entity(out: &mut impl Write, entity: &Entity, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", format_entity_details(entity)?)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(entity)?)?,
    }
    Ok(())
}

pub(crate) fn print_entity_line(out: &mut impl Write, entity: &Entity, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", format_entity_line(entity))?,
        // one object per line (JSONL)
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(entity)?)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
