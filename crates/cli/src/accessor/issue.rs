// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::info;
use ts_core::{Entity, EntityKind, GlobalId};

use super::{ops, Accessor, Removed};
use crate::error::{Error, Result};
use crate::store::Store;

/// Issues are closed instead of deleted on backends that cannot delete them.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueAccessor;

impl Accessor for IssueAccessor {
    fn kind(&self) -> EntityKind {
        EntityKind::Issue
    }

    fn remove(&self, store: &Store, entity: &Entity) -> Result<Removed> {
        if store.dialect().hard_delete(EntityKind::Issue) {
            return ops::delete(store, entity);
        }
        let id = entity.id().ok_or_else(|| Error::Addressing {
            kind: EntityKind::Issue,
            reason: "cannot remove an issue without an id".to_string(),
        })?;
        let parents = entity.parents();
        let target = GlobalId::new(id.clone(), parents.clone()).encode();

        let current = self.get(store, id, &parents)?;
        if current.is_closed() {
            return Err(Error::NotFound {
                kind: EntityKind::Issue,
                target,
            });
        }
        let closed = current.closed().ok_or(Error::KindMismatch {
            expected: EntityKind::Issue,
            found: current.kind(),
        })?;
        info!(issue = %target, "closing instead of deleting");
        let updated = self.update(store, &closed, Some(&current))?;
        if !updated.is_closed() {
            return Err(Error::Unchanged {
                kind: EntityKind::Issue,
                target,
            });
        }
        Ok(Removed::Closed(updated))
    }
}
