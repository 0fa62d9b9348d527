// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ts_core::{Entity, EntityKind};

use super::{ops, Accessor};
use crate::error::{Error, Result};
use crate::store::Store;

/// Members may be added by account name; the account is looked up first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberAccessor;

impl Accessor for MemberAccessor {
    fn kind(&self) -> EntityKind {
        EntityKind::Member
    }

    fn add(&self, store: &Store, entity: &Entity) -> Result<Entity> {
        let Entity::Member(member) = entity else {
            return Err(Error::KindMismatch {
                expected: EntityKind::Member,
                found: entity.kind(),
            });
        };
        if member.account.is_some() {
            return ops::add(store, self, entity);
        }
        let name = member.name.as_deref().ok_or(Error::Validation {
            kind: EntityKind::Member,
            field: "account",
        })?;
        let account = store.get_by_name(EntityKind::Account, name, &[])?;
        let mut member = member.clone();
        member.account = account.id().cloned();
        if member.account.is_none() {
            return Err(Error::Validation {
                kind: EntityKind::Member,
                field: "account",
            });
        }
        ops::add(store, self, &Entity::Member(member))
    }
}
