// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ts-core operations.

use thiserror::Error;

use crate::kind::EntityKind;

/// A remote payload did not have the shape a dialect expected.
///
/// Always tagged with the entity kind being decoded and the JSON key that was
/// missing or malformed, so callers can tell "the remote changed shape" apart
/// from "the object does not exist".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {kind} response: key '{key}' {reason}")]
pub struct ConversionError {
    pub kind: EntityKind,
    pub key: String,
    pub reason: String,
}

impl ConversionError {
    pub fn missing(kind: EntityKind, key: &str) -> Self {
        ConversionError {
            kind,
            key: key.to_string(),
            reason: "is missing".to_string(),
        }
    }

    pub fn invalid(kind: EntityKind, key: &str, expected: &str) -> Self {
        ConversionError {
            kind,
            key: key.to_string(),
            reason: format!("is not {}", expected),
        }
    }
}

/// All possible errors that can occur in ts-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown entity type: '{0}'\n  hint: valid types are: account, project, issue, milestone, label, comment, group, member")]
    UnknownType(String),

    #[error("invalid global id '{input}': {reason}")]
    InvalidGlobalId { input: String, reason: String },

    #[error("cannot address {kind}: {reason}")]
    Addressing { kind: EntityKind, reason: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("{kind} is missing required field '{field}'")]
    Validation {
        kind: EntityKind,
        field: &'static str,
    },

    #[error("expected a {expected}, got a {found}")]
    KindMismatch {
        expected: EntityKind,
        found: EntityKind,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for ts-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
