// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test doubles shared by unit tests.

#![allow(clippy::unwrap_used)]

use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use ts_core::{EntityId, EntityKind};

use crate::backend::Backend;
use crate::error::Result;
use crate::resolver::{Chains, Discovery, Enumerate};
use crate::session::Credentials;
use crate::store::Store;
use crate::transport::{Request, Transport, TransportError, TransportResult, Verb};

#[derive(Default)]
struct FakeState {
    routes: HashMap<String, VecDeque<TransportResult<Value>>>,
    log: Vec<Request>,
}

/// Canned responses keyed by `"VERB path"`.
///
/// Queued responses are returned in order; the last one repeats. Requests
/// without a route answer 404. Every request is recorded.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, verb: Verb, path: &str, response: TransportResult<Value>) {
        self.state
            .lock()
            .unwrap()
            .routes
            .entry(format!("{} {}", verb, path))
            .or_default()
            .push_back(response);
    }

    pub fn on(&self, verb: Verb, path: &str, body: Value) -> &Self {
        self.push(verb, path, Ok(body));
        self
    }

    pub fn fail(&self, verb: Verb, path: &str, status: u16) -> &Self {
        self.push(
            verb,
            path,
            Err(TransportError::Status {
                status,
                message: "canned failure".to_string(),
            }),
        );
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().log.clone()
    }

    /// Number of requests sent to `verb path`, any params.
    pub fn count(&self, verb: Verb, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.verb == verb && r.path() == path)
            .count()
    }

    /// Number of requests sent with `verb`.
    pub fn count_verb(&self, verb: Verb) -> usize {
        self.requests().iter().filter(|r| r.verb == verb).count()
    }

    /// The last request sent to `verb path`.
    pub fn last(&self, verb: Verb, path: &str) -> Option<Request> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.verb == verb && r.path() == path)
    }
}

impl Transport for FakeTransport {
    fn query(&self, request: &Request) -> TransportResult<Value> {
        let mut state = self.state.lock().unwrap();
        state.log.push(request.clone());
        let key = format!("{} {}", request.verb, request.path());
        match state.routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => Err(TransportError::Status {
                status: 404,
                message: format!("no route for {}", key),
            }),
        }
    }
}

/// Enumerating discovery that counts how often it is asked.
#[derive(Clone, Default)]
pub struct CountingDiscovery {
    calls: Arc<AtomicUsize>,
}

impl CountingDiscovery {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Discovery for CountingDiscovery {
    fn chains<'a>(&self, store: &'a Store, kind: EntityKind, prefix: &[EntityId]) -> Result<Chains<'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Enumerate.chains(store, kind, prefix)
    }
}

pub fn token() -> Credentials {
    Credentials {
        token: Some("secret".to_string()),
        ..Credentials::default()
    }
}

pub fn store(backend: Backend, fake: &FakeTransport) -> Store {
    Store::new(backend.dialect(None), Box::new(fake.clone()), token())
}

pub fn store_with(backend: Backend, fake: &FakeTransport, credentials: Credentials) -> Store {
    Store::new(backend.dialect(None), Box::new(fake.clone()), credentials)
}
