// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Returns the value of `TSYNC_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    non_empty(vars::TSYNC_CONFIG).map(PathBuf::from)
}

/// Returns the value of `TSYNC_TOKEN` if set and non-empty.
pub fn token() -> Option<String> {
    non_empty(vars::TSYNC_TOKEN)
}

/// Returns the value of `TSYNC_OAUTH` if set and non-empty.
pub fn oauth() -> Option<String> {
    non_empty(vars::TSYNC_OAUTH)
}

/// Returns the value of `TSYNC_LOGIN` if set and non-empty.
pub fn login() -> Option<String> {
    non_empty(vars::TSYNC_LOGIN)
}

/// Returns the value of `TSYNC_PASSWORD` if set and non-empty.
pub fn password() -> Option<String> {
    non_empty(vars::TSYNC_PASSWORD)
}

/// Returns the value of `TSYNC_LOG` if set. Takes precedence over `RUST_LOG`.
pub fn log_filter() -> Option<String> {
    non_empty(vars::TSYNC_LOG)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
