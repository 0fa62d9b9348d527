// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-kind accessors.
//!
//! An [`Accessor`] implements get, find, add, update and remove for one
//! entity kind on top of the store's resolver and dialect. The trait methods
//! default to the plain behavior in [`ops`]; accessors for kinds with extra
//! rules (issues close instead of being deleted, groups carry members,
//! members are added by account name) override what they need and fall back
//! to [`ops`] for the rest.

mod group;
mod issue;
mod member;
pub mod ops;
mod standard;

pub use group::GroupAccessor;
pub use issue::IssueAccessor;
pub use member::MemberAccessor;
pub use standard::Standard;

use ts_core::{split_global_name, Entity, EntityId, EntityKind, GlobalId, Query};

use crate::error::{Error, Result};
use crate::store::Store;

/// A lazy, single-pass sequence of entities.
pub type Found<'a> = Box<dyn Iterator<Item = Result<Entity>> + 'a>;

/// What `remove` did.
#[derive(Debug, Clone, PartialEq)]
pub enum Removed {
    /// The entity was deleted remotely.
    Deleted(Entity),
    /// The backend cannot delete the kind; the entity was closed instead.
    Closed(Entity),
}

impl Removed {
    pub fn entity(&self) -> &Entity {
        match self {
            Removed::Deleted(e) | Removed::Closed(e) => e,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Removed::Deleted(_) => "deleted",
            Removed::Closed(_) => "closed",
        }
    }
}

pub trait Accessor: Send + Sync {
    fn kind(&self) -> EntityKind;

    /// Gets one entity by id. `parents` may be complete, a prefix, or empty.
    fn get(&self, store: &Store, id: &EntityId, parents: &[EntityId]) -> Result<Entity> {
        ops::get(store, self.kind(), id, parents)
    }

    fn get_global(&self, store: &Store, gid: &GlobalId) -> Result<Entity> {
        self.get(store, &gid.id, &gid.parents)
    }

    /// Gets one entity by name, parents given by name too.
    fn get_by_name(&self, store: &Store, name: &str, parent_names: &[String]) -> Result<Entity> {
        let parents = ops::parent_ids(store, self.kind(), parent_names)?;
        ops::by_name(store, self.kind(), name, &parents)
    }

    /// `global_name` is the parent names and the name joined by `/`.
    fn get_by_global_name(&self, store: &Store, global_name: &str) -> Result<Entity> {
        let mut names = split_global_name(global_name)?;
        let name = names.pop().ok_or_else(|| Error::InvalidGlobalId {
            input: global_name.to_string(),
            reason: "no name segment".to_string(),
        })?;
        self.get_by_name(store, &name, &names)
    }

    fn find<'a>(&self, store: &'a Store, query: &Query) -> Result<Found<'a>> {
        ops::find(store, self.kind(), query)
    }

    fn add(&self, store: &Store, entity: &Entity) -> Result<Entity> {
        ops::add(store, self, entity)
    }

    /// Updates `entity`. `previous` is the remote state being replaced.
    fn update(&self, store: &Store, entity: &Entity, previous: Option<&Entity>) -> Result<Entity> {
        ops::update(store, self, entity, previous)
    }

    fn remove(&self, store: &Store, entity: &Entity) -> Result<Removed> {
        ops::delete(store, entity)
    }
}

/// The accessor for each of `kinds`.
pub fn registry(kinds: &[EntityKind]) -> Vec<Box<dyn Accessor>> {
    kinds
        .iter()
        .map(|&kind| -> Box<dyn Accessor> {
            match kind {
                EntityKind::Issue => Box::new(IssueAccessor),
                EntityKind::Group => Box::new(GroupAccessor),
                EntityKind::Member => Box::new(MemberAccessor),
                other => Box::new(Standard::new(other)),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
