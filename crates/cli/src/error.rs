// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;
use ts_core::{ConversionError, EntityKind};

use crate::transport::TransportError;

/// All possible errors that can occur in the tracksync library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} not found: {target}")]
    NotFound { kind: EntityKind, target: String },

    #[error("cannot address {kind}: {reason}\n  hint: pass the parent ids explicitly or use a global id")]
    Addressing { kind: EntityKind, reason: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("{kind} is missing required field '{field}'")]
    Validation {
        kind: EntityKind,
        field: &'static str,
    },

    #[error("unknown entity type: '{0}'\n  hint: valid types are: account, project, issue, milestone, label, comment, group, member")]
    UnknownType(String),

    #[error("the {backend} backend cannot {operation} {kind} entities")]
    Unsupported {
        backend: &'static str,
        kind: EntityKind,
        operation: &'static str,
    },

    #[error("{kind} {target} is unchanged: the remote kept it open")]
    Unchanged { kind: EntityKind, target: String },

    #[error("expected a {expected}, got a {found}")]
    KindMismatch {
        expected: EntityKind,
        found: EntityKind,
    },

    #[error("invalid global id '{input}': {reason}")]
    InvalidGlobalId { input: String, reason: String },

    #[error("remote error: {0}")]
    Transport(#[from] TransportError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument { arg: String, reason: String },
}

/// A specialized Result type for tracksync operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<ts_core::Error> for Error {
    fn from(e: ts_core::Error) -> Self {
        match e {
            ts_core::Error::UnknownType(s) => Error::UnknownType(s),
            ts_core::Error::InvalidGlobalId { input, reason } => {
                Error::InvalidGlobalId { input, reason }
            }
            ts_core::Error::Addressing { kind, reason } => Error::Addressing { kind, reason },
            ts_core::Error::Conversion(e) => Error::Conversion(e),
            ts_core::Error::Validation { kind, field } => Error::Validation { kind, field },
            ts_core::Error::KindMismatch { expected, found } => {
                Error::KindMismatch { expected, found }
            }
            ts_core::Error::Json(e) => Error::Json(e),
        }
    }
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
