// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::path::PathBuf;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// The binary with every tracksync variable cleared.
pub fn tsync() -> Command {
    let mut cmd = cargo_bin_cmd!("tsync");
    for var in [
        "TSYNC_CONFIG",
        "TSYNC_TOKEN",
        "TSYNC_OAUTH",
        "TSYNC_LOGIN",
        "TSYNC_PASSWORD",
        "TSYNC_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Writes a config pointing `backend` at `url` with a static token.
pub fn write_config(dir: &TempDir, backend: &str, url: &str) -> PathBuf {
    let path = dir.path().join("tracksync.toml");
    std::fs::write(
        &path,
        format!(
            "backend = \"{}\"\nurl = \"{}\"\ntoken = \"secret\"\npage_size = 2\n",
            backend, url
        ),
    )
    .unwrap();
    path
}
