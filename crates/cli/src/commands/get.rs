// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{self, Write};
use std::path::Path;
use ts_core::EntityKind;

use super::{lookup, open_store, parse_kind, print_entity, Lookup};
use crate::cli::OutputFormat;
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
    let entity = lookup(store, kind, target)?;
    print_entity(out, &entity, format)
}

#[cfg(test)]
#[path = "get_tests.rs"]
mod tests;
