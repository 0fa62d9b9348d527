// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;
    let path = std::path::Path::new(&out_dir).join("env_vars.rs");
    let mut f = std::fs::File::create(path)?;

    let vars = [
        ("TSYNC_CONFIG", "TSYNC_CONFIG"),
        ("TSYNC_TOKEN", "TSYNC_TOKEN"),
        ("TSYNC_OAUTH", "TSYNC_OAUTH"),
        ("TSYNC_LOGIN", "TSYNC_LOGIN"),
        ("TSYNC_PASSWORD", "TSYNC_PASSWORD"),
        ("TSYNC_LOG", "TSYNC_LOG"),
    ];

    for (const_name, env_name) in &vars {
        writeln!(f, "pub const {const_name}: &str = \"{env_name}\";")?;
    }

    Ok(())
}
