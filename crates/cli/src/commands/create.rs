// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{self, Write};
use std::path::Path;
use ts_core::{Entity, EntityKind};

use super::{open_store, parse_data, parse_kind, print_entity};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::store::Store;

pub fn run(config: Option<&Path>, kind: &str, data: &str, format: OutputFormat) -> Result<()> {
    let kind = parse_kind(kind)?;
    let fields = parse_data(data)?;
    let store = open_store(config)?;
    run_impl(&store, &mut io::stdout().lock(), kind, fields, format)
}

/// Internal implementation that accepts a store for testing.
pub(crate) fn run_impl(
    store: &Store,
    out: &mut impl Write,
    kind: EntityKind,
    fields: serde_json::Value,
    format: OutputFormat,
) -> Result<()> {
    let entity = Entity::from_fields(kind, fields)?;
    let created = store.create(&entity)?;
    print_entity(out, &created, format)
}

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;
