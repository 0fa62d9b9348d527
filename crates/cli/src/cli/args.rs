// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.

use clap::Args;

/// Parent ids, root first.
#[derive(Args, Clone, Debug, Default)]
pub struct ParentArgs {
    /// Parent id, root first (repeat for nested parents)
    #[arg(long = "parent", short = 'p', value_name = "id")]
    pub parent: Vec<String>,
}

/// Entity fields as a JSON object.
#[derive(Args, Clone, Debug)]
pub struct DataArgs {
    /// JSON object of fields, e.g. '{"name": "Crash"}'
    #[arg(long, short, value_name = "json")]
    pub data: String,
}
