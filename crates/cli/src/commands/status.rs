// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;
use std::io::{self, Write};
use std::path::Path;
use ts_core::Entity;

use super::{open_store, print_entity};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::store::Store;

pub fn run(config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;
    run_impl(&store, &mut io::stdout().lock(), format)
}

/// Internal implementation that accepts a store for testing.
pub(crate) fn run_impl(store: &Store, out: &mut impl Write, format: OutputFormat) -> Result<()> {
    let connected = store.is_connected();
    let backend = store.dialect().name();
    match format {
        OutputFormat::Text => {
            writeln!(out, "backend: {}", backend)?;
            writeln!(out, "connected: {}", if connected { "yes" } else { "no" })?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", json!({ "backend": backend, "connected": connected }))?;
        }
    }
    Ok(())
}

pub fn whoami(config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;
    whoami_impl(&store, &mut io::stdout().lock(), format)
}

pub(crate) fn whoami_impl(store: &Store, out: &mut impl Write, format: OutputFormat) -> Result<()> {
    store.connect()?;
    let account: Entity = store.current_account()?.into();
    print_entity(out, &account, format)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
