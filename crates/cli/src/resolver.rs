// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scope resolution, parent discovery and paged listings.
//!
//! The resolver turns `(kind, id, parents)` into an [`Address`] using the
//! dialect's scope chain. When parents are missing, a [`Discovery`] strategy
//! enumerates candidate parent chains one lineage level at a time; the
//! enumeration is lazy, so it stops as soon as the caller has what it needs.

use serde_json::Value;
use std::collections::VecDeque;
use std::iter;
use tracing::debug;
use ts_core::{Address, Entity, EntityId, EntityKind, GlobalId, ScopeChain};

use crate::error::{Error, Result};
use crate::store::Store;
use crate::transport::Request;

/// A lazy sequence of complete parent chains.
pub type Chains<'a> = Box<dyn Iterator<Item = Result<Vec<EntityId>>> + 'a>;

/// How missing parent ids are found.
pub trait Discovery: Send + Sync {
    /// All complete parent chains of `kind` that start with `prefix`.
    fn chains<'a>(&self, store: &'a Store, kind: EntityKind, prefix: &[EntityId]) -> Result<Chains<'a>>;
}

/// Lists each parent collection in turn, depth-first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enumerate;

impl Discovery for Enumerate {
    fn chains<'a>(&self, store: &'a Store, kind: EntityKind, prefix: &[EntityId]) -> Result<Chains<'a>> {
        let lineage = kind.lineage();
        if prefix.len() > lineage.len() {
            return Err(too_many_parents(kind, prefix.len()));
        }
        Ok(enumerate(store, lineage, prefix.to_vec()))
    }
}

fn enumerate<'a>(store: &'a Store, lineage: &'static [EntityKind], prefix: Vec<EntityId>) -> Chains<'a> {
    let Some(&parent_kind) = lineage.get(prefix.len()) else {
        return Box::new(iter::once(Ok(prefix)));
    };
    debug!(kind = %parent_kind, depth = prefix.len(), "discovering parents");
    let listing = match store.resolver().listing(parent_kind, &prefix) {
        Ok(listing) => listing,
        Err(e) => return Box::new(iter::once(Err(e))),
    };
    Box::new(listing.flat_map(move |item| -> Chains<'a> {
        let id = item.and_then(|entity| {
            entity.id().cloned().ok_or_else(|| Error::Addressing {
                kind: parent_kind,
                reason: "listed entity has no id".to_string(),
            })
        });
        match id {
            Ok(id) => {
                let mut next = prefix.clone();
                next.push(id);
                // a parent whose sub-collection is gone is skipped, not fatal
                Box::new(enumerate(store, lineage, next).filter(|r| !matches!(r, Err(e) if e.is_not_found())))
            }
            Err(e) => Box::new(iter::once(Err(e))),
        }
    }))
}

/// Refuses to discover anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscovery;

impl Discovery for NoDiscovery {
    fn chains<'a>(&self, _store: &'a Store, kind: EntityKind, prefix: &[EntityId]) -> Result<Chains<'a>> {
        if prefix.len() == kind.depth() {
            return Ok(Box::new(iter::once(Ok(prefix.to_vec()))));
        }
        Err(Error::Addressing {
            kind,
            reason: format!(
                "{} parent id(s) required, got {} and discovery is disabled",
                kind.depth(),
                prefix.len()
            ),
        })
    }
}

fn too_many_parents(kind: EntityKind, got: usize) -> Error {
    Error::Addressing {
        kind,
        reason: format!("{} takes {} parent id(s), got {}", kind, kind.depth(), got),
    }
}

/// Resolves addresses against one store's dialect.
#[derive(Clone, Copy)]
pub struct ScopeResolver<'s> {
    store: &'s Store,
}

impl<'s> ScopeResolver<'s> {
    pub fn new(store: &'s Store) -> Self {
        ScopeResolver { store }
    }

    pub fn chain(&self, kind: EntityKind) -> ScopeChain {
        self.store.dialect().scopes(kind)
    }

    /// Builds the address of `id` (or of the collection when `id` is `None`)
    /// under exactly `parents`.
    pub fn resolve(&self, kind: EntityKind, id: Option<&EntityId>, parents: &[EntityId]) -> Result<Address> {
        if parents.len() != kind.depth() {
            return Err(Error::Addressing {
                kind,
                reason: format!(
                    "{} takes {} parent id(s), got {}",
                    kind,
                    kind.depth(),
                    parents.len()
                ),
            });
        }
        Ok(Address::new(kind, self.chain(kind), parents.to_vec(), id.cloned())?)
    }

    pub fn resolve_global(&self, kind: EntityKind, gid: &GlobalId) -> Result<Address> {
        self.resolve(kind, Some(&gid.id), &gid.parents)
    }

    /// Walks the parent chains of `kind` starting with `prefix` and returns
    /// the first one for which `probe` yields something.
    ///
    /// Fails with an addressing error when every chain was tried.
    pub fn discover_parents<T, F>(
        &self,
        kind: EntityKind,
        prefix: &[EntityId],
        mut probe: F,
    ) -> Result<(Vec<EntityId>, T)>
    where
        F: FnMut(&[EntityId]) -> Result<Option<T>>,
    {
        for chain in self.store.discovery().chains(self.store, kind, prefix)? {
            let chain = chain?;
            if let Some(found) = probe(&chain)? {
                return Ok((chain, found));
            }
        }
        Err(Error::Addressing {
            kind,
            reason: match kind.parent() {
                Some(parent) => format!("no {} holds a matching {}", parent, kind),
                None => format!("no matching {}", kind),
            },
        })
    }

    /// A lazy, paged listing of the collection under `parents`.
    pub fn listing(&self, kind: EntityKind, parents: &[EntityId]) -> Result<Listing<'s>> {
        let address = self.resolve(kind, None, parents)?;
        let request = self.store.dialect().list(&address)?;
        Ok(Listing::new(self.store, kind, parents.to_vec(), request))
    }

    /// A listing narrowed server-side by one query parameter.
    pub fn search(&self, kind: EntityKind, parents: &[EntityId], param: &str, value: &str) -> Result<Listing<'s>> {
        let mut listing = self.listing(kind, parents)?;
        listing.request.set_param(param, value);
        Ok(listing)
    }
}

/// Single-pass iterator over a remote collection. Pages are requested only
/// as the iterator is consumed. The listing ends on a short or empty page,
/// or on a page that starts like the one before it.
pub struct Listing<'s> {
    store: &'s Store,
    kind: EntityKind,
    parents: Vec<EntityId>,
    request: Request,
    page: usize,
    first: Option<Value>,
    last: Option<Value>,
    buffer: VecDeque<Value>,
    done: bool,
}

impl<'s> Listing<'s> {
    fn new(store: &'s Store, kind: EntityKind, parents: Vec<EntityId>, request: Request) -> Self {
        Listing {
            store,
            kind,
            parents,
            request,
            page: 0,
            first: None,
            last: None,
            buffer: VecDeque::new(),
            done: false,
        }
    }

    fn fetch_page(&mut self) -> Result<()> {
        let store = self.store;
        let dialect = store.dialect();
        let kind = self.kind;
        let size = store.page_size().min(dialect.max_page_size());
        let mut request = self.request.clone();
        let paged = dialect.paginate(kind, &mut request, self.page, self.last.as_ref(), size);
        debug!(%kind, page = self.page, path = %request.path(), "listing page");

        let value = store.query(request).map_err(|e| match self.parents.split_last() {
            Some((id, rest)) => missing(
                e,
                kind.parent().unwrap_or(kind),
                GlobalId::new(id.clone(), rest.to_vec()).encode(),
            ),
            None => missing(e, kind, "collection"),
        })?;
        let items = dialect.items(kind, value)?;

        self.page += 1;
        // a remote that ignores the paging params serves the first page again
        if items.is_empty() || (self.page > 1 && items.first() == self.first.as_ref()) {
            self.done = true;
            return Ok(());
        }
        if !paged || items.len() < size {
            self.done = true;
        }
        self.first = items.first().cloned();
        self.last = items.last().cloned();
        self.buffer
            .extend(items.into_iter().filter(|item| dialect.keep(kind, item)));
        Ok(())
    }
}

impl Iterator for Listing<'_> {
    type Item = Result<Entity>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.buffer.pop_front() {
                return Some(self.store.dialect().decode(self.kind, &value, &self.parents));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.fetch_page() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

/// Maps a remote 404 to `NotFound` for the given target.
pub(crate) fn missing(error: Error, kind: EntityKind, target: impl Into<String>) -> Error {
    match error {
        Error::Transport(e) if e.is_not_found() => Error::NotFound {
            kind,
            target: target.into(),
        },
        other => other,
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
