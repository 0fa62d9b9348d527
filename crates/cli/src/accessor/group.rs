// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::BTreeSet;
use tracing::debug;
use ts_core::{Entity, EntityId, EntityKind, Group, Member, MembershipDelta};

use super::{ops, Accessor};
use crate::error::{Error, Result};
use crate::store::Store;

/// Groups carry their member set. `get` fills it in; `add` and `update`
/// replay membership changes one account at a time through the member
/// accessor.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupAccessor;

fn group(entity: &Entity) -> Result<&Group> {
    match entity {
        Entity::Group(g) => Ok(g),
        other => Err(Error::KindMismatch {
            expected: EntityKind::Group,
            found: other.kind(),
        }),
    }
}

fn group_id(g: &Group) -> Result<EntityId> {
    g.id.clone().ok_or_else(|| Error::Addressing {
        kind: EntityKind::Group,
        reason: format!("group '{}' has no id", g.name),
    })
}

/// The group without members, for the group's own fields.
fn bare(g: &Group) -> Group {
    Group {
        members: BTreeSet::new(),
        ..g.clone()
    }
}

fn fields_changed(new: &Group, old: &Group) -> bool {
    new.name != old.name || new.path != old.path || new.description != old.description
}

impl GroupAccessor {
    fn with_members(&self, store: &Store, entity: Entity) -> Result<Entity> {
        let mut g = group(&entity)?.clone();
        let id = group_id(&g)?;
        let mut members = BTreeSet::new();
        for item in store.resolver().listing(EntityKind::Member, &[id])? {
            if let Some(account) = item?.id() {
                members.insert(account.clone());
            }
        }
        g.members = members;
        Ok(Entity::Group(g))
    }

    fn apply(&self, store: &Store, id: &EntityId, delta: &MembershipDelta) -> Result<()> {
        debug!(group = %id, add = delta.to_add.len(), remove = delta.to_remove.len(), "updating membership");
        for account in &delta.to_add {
            store.create(&Entity::Member(Member::new(id.clone(), account.clone())))?;
        }
        for account in &delta.to_remove {
            store.delete(&Entity::Member(Member::new(id.clone(), account.clone())))?;
        }
        Ok(())
    }
}

impl Accessor for GroupAccessor {
    fn kind(&self) -> EntityKind {
        EntityKind::Group
    }

    fn get(&self, store: &Store, id: &EntityId, parents: &[EntityId]) -> Result<Entity> {
        let entity = ops::get(store, EntityKind::Group, id, parents)?;
        self.with_members(store, entity)
    }

    fn get_by_name(&self, store: &Store, name: &str, parent_names: &[String]) -> Result<Entity> {
        let parents = ops::parent_ids(store, EntityKind::Group, parent_names)?;
        let entity = ops::by_name(store, EntityKind::Group, name, &parents)?;
        self.with_members(store, entity)
    }

    fn add(&self, store: &Store, entity: &Entity) -> Result<Entity> {
        let new = group(entity)?;
        let created = ops::add(store, self, &Entity::Group(bare(new)))?;
        let id = group_id(group(&created)?)?;
        let delta = MembershipDelta {
            to_add: new.members.clone(),
            to_remove: BTreeSet::new(),
        };
        if delta.is_empty() {
            return Ok(created);
        }
        self.apply(store, &id, &delta)?;
        self.get(store, &id, &[])
    }

    fn update(&self, store: &Store, entity: &Entity, previous: Option<&Entity>) -> Result<Entity> {
        let new = group(entity)?;
        let id = match previous {
            Some(p) => group_id(group(p)?)?,
            None => group_id(new)?,
        };
        let fetched;
        let old = match previous {
            Some(p) => group(p)?,
            None => {
                fetched = self.get(store, &id, &[])?;
                group(&fetched)?
            }
        };

        if fields_changed(new, old) {
            ops::update(
                store,
                self,
                &Entity::Group(bare(new)),
                Some(&Entity::Group(bare(old))),
            )?;
        }
        self.apply(store, &id, &MembershipDelta::between(new, old))?;
        self.get(store, &id, &[])
    }
}
