// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The Store façade.
//!
//! A [`Store`] owns everything one backend connection needs: the dialect,
//! the transport, the session, the discovery strategy and one accessor per
//! entity kind. Every operation routes by kind to the registered accessor,
//! which receives the store back by reference for nested calls.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{info, warn};
use ts_core::{Account, Entity, EntityId, EntityKind, GlobalId, Query, Record, Reference};

use crate::accessor::{self, Accessor, Found, Removed};
use crate::backend::Dialect;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::resolver::{Discovery, Enumerate, NoDiscovery, ScopeResolver};
use crate::session::{Credentials, Session};
use crate::transport::{HttpTransport, Request, Transport};

/// Listing page size unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 50;

pub struct Store {
    dialect: Box<dyn Dialect>,
    transport: Box<dyn Transport>,
    session: Session,
    accessors: HashMap<EntityKind, Box<dyn Accessor>>,
    discovery: Box<dyn Discovery>,
    page_size: usize,
    account: RwLock<Option<Account>>,
}

impl Store {
    /// Creates a store with the default accessor for every kind the dialect
    /// supports and enumerating discovery.
    pub fn new(
        dialect: Box<dyn Dialect>,
        transport: Box<dyn Transport>,
        credentials: Credentials,
    ) -> Self {
        let mut store = Store {
            dialect,
            transport,
            session: Session::new(credentials),
            accessors: HashMap::new(),
            discovery: Box::new(Enumerate),
            page_size: DEFAULT_PAGE_SIZE,
            account: RwLock::new(None),
        };
        for accessor in accessor::registry(store.dialect.kinds()) {
            store.register(accessor);
        }
        store
    }

    /// Builds a store talking HTTP to the configured backend.
    pub fn from_config(config: &Config) -> Result<Self> {
        let dialect = config.backend.dialect(config.api_version.as_deref());
        let transport = HttpTransport::new(&config.url, &dialect.api_root(), config.timeout())?;
        let mut store = Store::new(dialect, Box::new(transport), config.credentials())
            .with_page_size(config.page_size);
        if !config.discovery {
            store = store.with_discovery(Box::new(NoDiscovery));
        }
        Ok(store)
    }

    pub fn with_discovery(mut self, discovery: Box<dyn Discovery>) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Adds or replaces the accessor for its kind.
    pub fn register(&mut self, accessor: Box<dyn Accessor>) {
        self.accessors.insert(accessor.kind(), accessor);
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn discovery(&self) -> &dyn Discovery {
        self.discovery.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn resolver(&self) -> ScopeResolver<'_> {
        ScopeResolver::new(self)
    }

    /// Registered kinds, in a stable order.
    pub fn kinds(&self) -> Vec<EntityKind> {
        let mut kinds: Vec<_> = self.accessors.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn accessor(&self, kind: EntityKind) -> Result<&dyn Accessor> {
        self.accessors
            .get(&kind)
            .map(|a| a.as_ref())
            .ok_or_else(|| Error::UnknownType(kind.to_string()))
    }

    /// Sends one request with credentials attached.
    ///
    /// A 401 on a renewable session drops the token, logs in again and
    /// retries once.
    pub fn query(&self, mut request: Request) -> Result<Value> {
        let dialect = self.dialect();
        let transport = self.transport.as_ref();
        self.session.authorize(dialect, transport, &mut request)?;
        match transport.query(&request) {
            Err(e) if e.is_unauthorized() && self.session.renewable(dialect) => {
                info!(path = %request.path(), "session rejected, logging in again");
                self.session.invalidate();
                self.session.authorize(dialect, transport, &mut request)?;
                transport.query(&request).map_err(|e| {
                    if e.is_unauthorized() {
                        warn!(backend = dialect.name(), "credentials rejected after renewal");
                    }
                    e.into()
                })
            }
            Err(e) if e.is_unauthorized() => {
                warn!(backend = dialect.name(), "credentials rejected");
                Err(e.into())
            }
            other => other.map_err(Into::into),
        }
    }

    /// Drops the cached session and current account, then logs in again when
    /// login credentials are configured.
    pub fn connect(&self) -> Result<()> {
        self.session.invalidate();
        self.set_account(None);
        self.session.login(self.dialect(), self.transport.as_ref())
    }

    /// Performs the cheapest authenticated call. Any failure means `false`.
    pub fn is_connected(&self) -> bool {
        match self.whoami() {
            Ok(_) => true,
            Err(e) => {
                info!(error = %e, "not connected");
                false
            }
        }
    }

    /// The authenticated account, fetched once and cached.
    pub fn current_account(&self) -> Result<Account> {
        let cached = match self.account.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        if let Some(account) = cached {
            return Ok(account);
        }
        let account = self.whoami()?;
        self.set_account(Some(account.clone()));
        Ok(account)
    }

    fn whoami(&self) -> Result<Account> {
        let value = self.query(self.dialect.whoami())?;
        let entity = self.dialect.decode(EntityKind::Account, &value, &[])?;
        Ok(Account::from_entity(entity)?)
    }

    fn set_account(&self, account: Option<Account>) {
        match self.account.write() {
            Ok(mut guard) => *guard = account,
            Err(poisoned) => *poisoned.into_inner() = account,
        }
    }

    /// Gets one entity. `parents` may be complete, a prefix, or empty; missing
    /// parents are discovered.
    pub fn get(&self, kind: EntityKind, id: &EntityId, parents: &[EntityId]) -> Result<Entity> {
        self.accessor(kind)?.get(self, id, parents)
    }

    pub fn get_global(&self, kind: EntityKind, gid: &GlobalId) -> Result<Entity> {
        self.accessor(kind)?.get_global(self, gid)
    }

    pub fn get_by_name(&self, kind: EntityKind, name: &str, parent_names: &[String]) -> Result<Entity> {
        self.accessor(kind)?.get_by_name(self, name, parent_names)
    }

    pub fn get_by_global_name(&self, kind: EntityKind, global_name: &str) -> Result<Entity> {
        self.accessor(kind)?.get_by_global_name(self, global_name)
    }

    /// Typed variant of [`Store::get`].
    pub fn fetch<T: Record>(&self, id: &EntityId, parents: &[EntityId]) -> Result<T> {
        let entity = self.get(T::KIND, id, parents)?;
        Ok(T::from_entity(entity)?)
    }

    pub fn find(&self, kind: EntityKind, query: &Query) -> Result<Found<'_>> {
        self.accessor(kind)?.find(self, query)
    }

    pub fn create(&self, entity: &Entity) -> Result<Entity> {
        self.accessor(entity.kind())?.add(self, entity)
    }

    /// Updates `entity`. `previous` is the remote state it replaces, when the
    /// caller has it.
    pub fn save(&self, entity: &Entity, previous: Option<&Entity>) -> Result<Entity> {
        self.accessor(entity.kind())?.update(self, entity, previous)
    }

    pub fn delete(&self, entity: &Entity) -> Result<Removed> {
        self.accessor(entity.kind())?.remove(self, entity)
    }

    /// Resolves a reference to the entity it points at.
    pub fn follow(&self, reference: &Reference) -> Result<Entity> {
        self.get(reference.kind, &reference.id, &reference.parents)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("dialect", &self.dialect.name())
            .field("kinds", &self.kinds())
            .field("page_size", &self.page_size)
            .finish()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
