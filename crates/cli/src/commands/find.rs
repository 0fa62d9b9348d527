// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;
use std::io::{self, Write};
use std::path::Path;
use ts_core::{EntityKind, Query};

use super::{open_store, parse_ids, parse_kind, print_entity_line};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::store::Store;

pub fn run(
    config: Option<&Path>,
    kind: &str,
    parents: &[String],
    criteria: &[(String, String)],
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let store = open_store(config)?;
    let query = build_query(parents, criteria);
    run_impl(&store, &mut io::stdout().lock(), kind, &query, limit, format)
}

/// Builds the query; no parents means "discover them".
pub(crate) fn build_query(parents: &[String], criteria: &[(String, String)]) -> Query {
    let mut query = Query::new();
    if !parents.is_empty() {
        query = query.within(parse_ids(parents));
    }
    for (key, value) in criteria {
        query = query.with(key.clone(), Value::String(value.clone()));
    }
    query
}

/// Internal implementation that accepts a store for testing.
pub(crate) fn run_impl(
    store: &Store,
    out: &mut impl Write,
    kind: EntityKind,
    query: &Query,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let found = store.find(kind, query)?;
    for entity in found.take(limit.unwrap_or(usize::MAX)) {
        print_entity_line(out, &entity?, format)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "find_tests.rs"]
mod tests;
