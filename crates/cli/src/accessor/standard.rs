// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ts_core::EntityKind;

use super::Accessor;

/// Accessor with no kind-specific rules: accounts, projects, milestones,
/// labels and comments.
#[derive(Debug, Clone, Copy)]
pub struct Standard {
    kind: EntityKind,
}

impl Standard {
    pub fn new(kind: EntityKind) -> Self {
        Standard { kind }
    }
}

impl Accessor for Standard {
    fn kind(&self) -> EntityKind {
        self.kind
    }
}
