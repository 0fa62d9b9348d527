// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

pub use args::{DataArgs, ParentArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Parse a `key=value` criterion.
fn criterion(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

/// Output format for commands printing entities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tsync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read and write issue tracker entities on GitLab, GitHub and Jira")]
#[command(
    long_about = "Read and write issue tracker entities on GitLab, GitHub and Jira.\n\n\
    Entities are addressed by kind, id and the ids of their parents. Parents left \
    out are discovered by searching the parent collections."
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the configured backend accepts the credentials
    Status,

    /// Show the authenticated account
    Whoami,

    /// Get one entity
    #[command(after_help = "\
Examples:
  tsync get issue 42 -p 7           Issue 42 of project 7
  tsync get issue 42                Issue 42 of whichever project holds it
  tsync get issue 7/42 --global     Issue by global id
  tsync get label bug -p 7 --name   Label named 'bug' in project 7")]
    Get {
        /// Entity kind (account, project, issue, milestone, label, comment, group, member)
        #[arg(value_parser = non_empty_string)]
        kind: String,

        /// Entity id, global id with --global, or name with --name
        #[arg(value_parser = non_empty_string)]
        id: String,

        #[command(flatten)]
        parents: ParentArgs,

        /// Treat <id> as a global id (parents and id joined by '/')
        #[arg(long, short, conflicts_with_all = ["name", "parent"])]
        global: bool,

        /// Treat <id> and parents as names
        #[arg(long, short)]
        name: bool,
    },

    /// List entities matching criteria
    #[command(after_help = "\
Examples:
  tsync find issue -p 7                    Issues of project 7
  tsync find issue -w state=open -n 10     First 10 open issues of any project
  tsync find milestone                     Milestones of every project")]
    Find {
        #[arg(value_parser = non_empty_string)]
        kind: String,

        #[command(flatten)]
        parents: ParentArgs,

        /// Field criterion (repeat for AND)
        #[arg(long = "where", short = 'w', value_name = "key=value", value_parser = criterion)]
        criteria: Vec<(String, String)>,

        /// Maximum number of results
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Create an entity from JSON fields
    Create {
        #[arg(value_parser = non_empty_string)]
        kind: String,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Update an entity with JSON fields
    Update {
        #[arg(value_parser = non_empty_string)]
        kind: String,

        #[arg(value_parser = non_empty_string)]
        id: String,

        #[command(flatten)]
        parents: ParentArgs,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Delete an entity (issues are closed where they cannot be deleted)
    Delete {
        #[arg(value_parser = non_empty_string)]
        kind: String,

        #[arg(value_parser = non_empty_string)]
        id: String,

        #[command(flatten)]
        parents: ParentArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
