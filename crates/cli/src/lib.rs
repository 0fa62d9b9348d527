// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tracksync - resource addressing and CRUD dispatch for remote issue trackers.
//!
//! This crate provides the engine behind the `tsync` CLI. A [`Store`] binds
//! one backend [`Dialect`](backend::Dialect) (GitLab, GitHub or Jira) to a
//! [`Transport`](transport::Transport) and a [`Session`](session::Session),
//! and dispatches get, find, create, update and delete calls to the per-kind
//! [`Accessor`](accessor::Accessor)s.
//!
//! # Main Components
//!
//! - [`Store`] - entry point owning the dialect, transport, session and accessors
//! - [`resolver`] - scope resolution, parent discovery and lazy paged listings
//! - [`backend`] - per-backend addressing, auth and field mapping
//! - [`Config`] - connection settings loaded from TOML and the environment
//! - [`Error`] - Error types for all operations
//!
//! ```rust,ignore
//! use tracksync::{Config, Store};
//! use ts_core::{EntityId, EntityKind};
//!
//! let config = Config::resolve(None)?;
//! let store = Store::from_config(&config)?;
//! let issue = store.get(EntityKind::Issue, &EntityId::Num(42), &[])?;
//! ```

mod cli;
mod commands;
mod display;
mod env;

pub mod accessor;
pub mod backend;
pub mod config;
pub mod error;
pub mod resolver;
pub mod session;
pub mod store;
pub mod transport;

#[cfg(test)]
mod testing;

pub use backend::Backend;
pub use cli::{Cli, Command, DataArgs, OutputFormat, ParentArgs};
pub use commands::Lookup;
pub use config::Config;
pub use env::log_filter;
pub use error::{Error, Result};
pub use store::Store;

use clap::CommandFactory;
use clap_complete::generate;
use std::path::Path;

/// How `get` names its target, from the `--global` and `--name` flags.
fn get_target(id: String, parents: Vec<String>, global: bool, name: bool) -> Lookup {
    if global {
        Lookup::Global(id)
    } else if name {
        Lookup::Name { name: id, parents }
    } else {
        Lookup::Id { id, parents }
    }
}

/// Execute a CLI invocation. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let config: Option<&Path> = cli.config.as_deref();
    let format = cli.output;
    match cli.command {
        Command::Status => commands::status::run(config, format),
        Command::Whoami => commands::status::whoami(config, format),
        Command::Get {
            kind,
            id,
            parents,
            global,
            name,
        } => {
            let target = get_target(id, parents.parent, global, name);
            commands::get::run(config, &kind, &target, format)
        }
        Command::Find {
            kind,
            parents,
            criteria,
            limit,
        } => commands::find::run(config, &kind, &parents.parent, &criteria, limit, format),
        Command::Create { kind, data } => commands::create::run(config, &kind, &data.data, format),
        Command::Update {
            kind,
            id,
            parents,
            data,
        } => {
            let target = Lookup::Id {
                id,
                parents: parents.parent,
            };
            commands::update::run(config, &kind, &target, &data.data, format)
        }
        Command::Delete { kind, id, parents } => {
            let target = Lookup::Id {
                id,
                parents: parents.parent,
            };
            commands::delete::run(config, &kind, &target, format)
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "tsync", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
