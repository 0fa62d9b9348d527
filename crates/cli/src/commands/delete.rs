// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;
use std::io::{self, Write};
use std::path::Path;
use ts_core::EntityKind;

use super::{lookup, open_store, parse_kind, Lookup};
use crate::cli::OutputFormat;
use crate::display::format_removed;
use crate::error::Result;
use crate::store::Store;

pub fn run(config: Option<&Path>, kind: &str, target: &Lookup, format: OutputFormat) -> Result<()> {
    let kind = parse_kind(kind)?;
    let store = open_store(config)?;
    run_impl(&store, &mut io::stdout().lock(), kind, target, format)
}

/// Internal implementation that accepts a store for testing.
pub(crate) fn run_impl(
    store: &Store,
    out: &mut impl Write,
    kind: EntityKind,
    target: &Lookup,
    format: OutputFormat,
) -> Result<()> {
    let current = lookup(store, kind, target)?;
    let removed = store.delete(&current)?;
    match format {
        OutputFormat::Text => writeln!(out, "{}", format_removed(&removed))?,
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "result": removed.verb(), "entity": removed.entity() })
        )?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "delete_tests.rs"]
mod tests;
