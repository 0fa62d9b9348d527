// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain accessor behavior, shared by every kind.

use std::iter;
use tracing::debug;
use ts_core::{Entity, EntityId, EntityKind, GlobalId, Query};

use super::{Accessor, Found, Removed};
use crate::backend::{Naming, Written};
use crate::error::{Error, Result};
use crate::resolver::missing;
use crate::store::Store;

fn target(id: &EntityId, parents: &[EntityId]) -> String {
    GlobalId::new(id.clone(), parents.to_vec()).encode()
}

/// Ids compare by their text so `"7"` typed by a user matches a numeric 7.
fn same_id(a: &EntityId, b: &EntityId) -> bool {
    a == b || a.to_string() == b.to_string()
}

fn has_name(entity: &Entity, name: &str) -> bool {
    if entity.name() == Some(name) {
        return true;
    }
    matches!(entity, Entity::Project(p) if p.key.as_deref() == Some(name))
}

/// Maps a 404 on a collection to `NotFound` for the parent that holds it.
fn parent_missing(error: Error, kind: EntityKind, parents: &[EntityId]) -> Error {
    match parents.split_last() {
        Some((id, rest)) => missing(error, kind.parent().unwrap_or(kind), target(id, rest)),
        None => error,
    }
}

/// Fetches `id` under exactly `parents`.
pub fn get_at(store: &Store, kind: EntityKind, id: &EntityId, parents: &[EntityId]) -> Result<Entity> {
    let address = store.resolver().resolve(kind, Some(id), parents)?;
    match store.dialect().fetch(&address)? {
        Some(request) => {
            let value = store
                .query(request)
                .map_err(|e| missing(e, kind, target(id, parents)))?;
            store.dialect().decode(kind, &value, parents)
        }
        None => {
            debug!(%kind, %id, "no item route, scanning");
            for item in store.resolver().listing(kind, parents)? {
                let entity = item?;
                if entity.id().is_some_and(|found| same_id(found, id)) {
                    return Ok(entity);
                }
            }
            Err(Error::NotFound {
                kind,
                target: target(id, parents),
            })
        }
    }
}

/// Fetches `id`, discovering whatever parents are missing from `parents`.
pub fn get(store: &Store, kind: EntityKind, id: &EntityId, parents: &[EntityId]) -> Result<Entity> {
    if parents.len() >= kind.depth() {
        return get_at(store, kind, id, parents);
    }
    if parents.is_empty() {
        if let Some(request) = store.dialect().fetch_unscoped(kind, id) {
            let value = store
                .query(request)
                .map_err(|e| missing(e, kind, id.to_string()))?;
            return store.dialect().decode(kind, &value, &[]);
        }
    }
    let (_, entity) = store
        .resolver()
        .discover_parents(kind, parents, |chain| match get_at(store, kind, id, chain) {
            Ok(entity) => Ok(Some(entity)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        })?;
    Ok(entity)
}

/// Resolves parent names, root first, to parent ids.
pub fn parent_ids(store: &Store, kind: EntityKind, names: &[String]) -> Result<Vec<EntityId>> {
    let lineage = kind.lineage();
    if names.len() > lineage.len() {
        return Err(Error::Addressing {
            kind,
            reason: format!("{} takes {} parent name(s), got {}", kind, lineage.len(), names.len()),
        });
    }
    let mut ids = Vec::with_capacity(names.len());
    for (&parent_kind, name) in lineage.iter().zip(names) {
        let parent = by_name(store, parent_kind, name, &ids)?;
        let id = parent.id().cloned().ok_or_else(|| Error::Addressing {
            kind: parent_kind,
            reason: format!("'{}' has no id", name),
        })?;
        ids.push(id);
    }
    Ok(ids)
}

/// Looks up `name` using the dialect's naming policy for `kind`.
pub fn by_name(store: &Store, kind: EntityKind, name: &str, parents: &[EntityId]) -> Result<Entity> {
    let naming = store.dialect().naming(kind);
    let param = match naming {
        Naming::Identifier => return get(store, kind, &EntityId::Key(name.to_string()), parents),
        Naming::Unsupported => {
            return Err(Error::Unsupported {
                backend: store.dialect().name(),
                kind,
                operation: "look up by name",
            })
        }
        Naming::Search(param) => Some(param),
        Naming::Scan => None,
    };
    let probe = |chain: &[EntityId]| -> Result<Option<Entity>> {
        let listing = match param {
            Some(param) => store.resolver().search(kind, chain, param, name)?,
            None => store.resolver().listing(kind, chain)?,
        };
        for item in listing {
            let entity = item?;
            if has_name(&entity, name) {
                return Ok(Some(entity));
            }
        }
        Ok(None)
    };
    if parents.len() >= kind.depth() {
        return probe(parents)?.ok_or_else(|| Error::NotFound {
            kind,
            target: name.to_string(),
        });
    }
    let (_, entity) = store.resolver().discover_parents(kind, parents, probe)?;
    Ok(entity)
}

/// Lists every entity matching `query`, discovering parents unless the query
/// pins all of them.
pub fn find<'a>(store: &'a Store, kind: EntityKind, query: &Query) -> Result<Found<'a>> {
    let parents = query.parents.clone().unwrap_or_default();
    let found: Found<'a> = if parents.len() >= kind.depth() {
        Box::new(store.resolver().listing(kind, &parents)?)
    } else {
        let chains = store.discovery().chains(store, kind, &parents)?;
        Box::new(chains.flat_map(move |chain| -> Found<'a> {
            match chain.and_then(|chain| store.resolver().listing(kind, &chain)) {
                // a discovered parent without the collection holds nothing
                Ok(listing) => Box::new(listing.filter(|item| !matches!(item, Err(e) if e.is_not_found()))),
                Err(e) => Box::new(iter::once(Err(e))),
            }
        }))
    };
    let query = query.clone();
    Ok(Box::new(found.filter(move |item| {
        item.as_ref().map_or(true, |entity| query.matches(entity))
    })))
}

fn written<A: Accessor + ?Sized>(
    store: &Store,
    accessor: &A,
    entity: &Entity,
    value: &serde_json::Value,
) -> Result<Entity> {
    match store.dialect().decode_written(entity, value)? {
        Written::Decoded(entity) => Ok(entity),
        Written::Refetch(id) => accessor.get(store, &id, &entity.parents()),
    }
}

/// Encodes, creates, and decodes the created entity.
pub fn add<A: Accessor + ?Sized>(store: &Store, accessor: &A, entity: &Entity) -> Result<Entity> {
    let kind = entity.kind();
    let parents = entity.parents();
    let address = store.resolver().resolve(kind, None, &parents)?;
    let body = store.dialect().encode(entity, None)?;
    let request = store.dialect().create(&address, entity, body)?;
    debug!(%kind, path = %request.path(), "creating");
    let value = store
        .query(request)
        .map_err(|e| parent_missing(e, kind, &parents))?;
    written(store, accessor, entity, &value)
}

/// Sends the changes from `previous` (if known) to `entity`.
pub fn update<A: Accessor + ?Sized>(
    store: &Store,
    accessor: &A,
    entity: &Entity,
    previous: Option<&Entity>,
) -> Result<Entity> {
    let kind = entity.kind();
    if let Some(previous) = previous {
        if previous.kind() != kind {
            return Err(Error::KindMismatch {
                expected: kind,
                found: previous.kind(),
            });
        }
    }
    let id = previous
        .and_then(Entity::id)
        .or(entity.id())
        .cloned()
        .ok_or_else(|| Error::Addressing {
            kind,
            reason: "cannot update an entity without an id".to_string(),
        })?;
    let parents = entity.parents();
    let address = store.resolver().resolve(kind, Some(&id), &parents)?;
    let body = store.dialect().encode(entity, previous)?;
    let request = store.dialect().modify(&address, entity, body)?;
    debug!(%kind, path = %request.path(), "updating");
    let value = store
        .query(request)
        .map_err(|e| missing(e, kind, target(&id, &parents)))?;
    written(store, accessor, entity, &value)
}

/// Hard-deletes `entity`.
pub fn delete(store: &Store, entity: &Entity) -> Result<Removed> {
    let kind = entity.kind();
    if !store.dialect().hard_delete(kind) {
        return Err(Error::Unsupported {
            backend: store.dialect().name(),
            kind,
            operation: "delete",
        });
    }
    let id = entity.id().ok_or_else(|| Error::Addressing {
        kind,
        reason: "cannot delete an entity without an id".to_string(),
    })?;
    let parents = entity.parents();
    let address = store.resolver().resolve(kind, Some(id), &parents)?;
    let request = store.dialect().delete(&address, entity)?;
    debug!(%kind, path = %request.path(), "deleting");
    store
        .query(request)
        .map_err(|e| missing(e, kind, target(id, &parents)))?;
    Ok(Removed::Deleted(entity.clone()))
}
