// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;
use std::io::{self, Write};
use std::path::Path;
use ts_core::{Entity, EntityKind};

use super::{lookup, open_store, parse_data, parse_kind, print_entity, Lookup};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::store::Store;

pub fn run(config: Option<&Path>, kind: &str, target: &Lookup, data: &str, format: OutputFormat) -> Result<()> {
    let kind = parse_kind(kind)?;
    let changes = parse_data(data)?;
    let store = open_store(config)?;
    run_impl(&store, &mut io::stdout().lock(), kind, target, changes, format)
}

/// Overlays the top-level keys of `changes` onto `current`.
pub(crate) fn merge(current: Value, changes: Value) -> Value {
    match (current, changes) {
        (Value::Object(mut base), Value::Object(changes)) => {
            for (key, value) in changes {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (_, changes) => changes,
    }
}

/// Internal implementation that accepts a store for testing.
pub(crate) fn run_impl(
    store: &Store,
    out: &mut impl Write,
    kind: EntityKind,
    target: &Lookup,
    changes: Value,
    format: OutputFormat,
) -> Result<()> {
    let current = lookup(store, kind, target)?;
    let fields = merge(current.to_value()?, changes);
    let entity = Entity::from_fields(kind, fields)?;
    let saved = store.save(&entity, Some(&current))?;
    print_entity(out, &saved, format)
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
