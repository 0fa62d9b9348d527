// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for remote REST calls.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP calls for production ([`HttpTransport`])
//! - Fake transports for unit testing
//!
//! A [`Request`] is backend-neutral: verb, scope names, parent ids, target id,
//! query parameters, JSON body and credentials. The transport turns it into a
//! URL by interleaving scopes and ids and returns the decoded JSON response.

use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use ts_core::EntityId;
use url::Url;

/// Error type for transport operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The remote answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The remote could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response body was not valid JSON.
    #[error("cannot decode response: {0}")]
    Decode(String),

    /// The request could not be turned into a URL.
    #[error("malformed request: {0}")]
    Malformed(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }

    fn method(&self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Patch => reqwest::Method::PATCH,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How textual ids are placed in the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStyle {
    /// One path segment per id; `/` inside a key is percent-encoded.
    #[default]
    Encoded,
    /// Keys containing `/` span several path segments (`owner/repo`).
    Verbatim,
}

/// Credentials attached to one request.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    Query { name: String, value: String },
    Header { name: String, value: String },
    Basic { user: String, password: String },
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Query { name, .. } => write!(f, "Query({name}=***)"),
            Auth::Header { name, .. } => write!(f, "Header({name}: ***)"),
            Auth::Basic { user, .. } => write!(f, "Basic({user}:***)"),
        }
    }
}

/// One remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub verb: Verb,
    /// Scope names; a name may hold several fixed segments (`issues/comments`).
    pub scopes: Vec<String>,
    /// Ids placed after the scope with the same index.
    pub parents: Vec<EntityId>,
    pub id: Option<EntityId>,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub id_style: IdStyle,
    pub auth: Option<Auth>,
}

impl Request {
    pub fn new<I, S>(verb: Verb, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Request {
            verb,
            scopes: scopes.into_iter().map(Into::into).collect(),
            parents: Vec::new(),
            id: None,
            params: Vec::new(),
            body: None,
            id_style: IdStyle::Encoded,
            auth: None,
        }
    }

    pub fn get<I: IntoIterator<Item = S>, S: Into<String>>(scopes: I) -> Self {
        Self::new(Verb::Get, scopes)
    }

    pub fn post<I: IntoIterator<Item = S>, S: Into<String>>(scopes: I) -> Self {
        Self::new(Verb::Post, scopes)
    }

    pub fn with_parents(mut self, parents: Vec<EntityId>) -> Self {
        self.parents = parents;
        self
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_param(name, value);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_verb(mut self, verb: Verb) -> Self {
        self.verb = verb;
        self
    }

    pub fn verbatim(mut self) -> Self {
        self.id_style = IdStyle::Verbatim;
        self
    }

    /// Sets a query parameter, replacing any previous value.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Raw path segments in order, before percent-encoding.
    pub fn segments(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (i, scope) in self.scopes.iter().enumerate() {
            out.extend(scope.split('/').filter(|s| !s.is_empty()).map(str::to_string));
            if let Some(parent) = self.parents.get(i) {
                self.push_id(parent, &mut out);
            }
        }
        if let Some(id) = &self.id {
            self.push_id(id, &mut out);
        }
        out
    }

    /// The request path, for logs and display.
    pub fn path(&self) -> String {
        self.segments().join("/")
    }

    fn push_id(&self, id: &EntityId, out: &mut Vec<String>) {
        match (self.id_style, id) {
            (IdStyle::Verbatim, EntityId::Key(key)) => {
                out.extend(key.split('/').map(str::to_string));
            }
            _ => out.push(id.to_string()),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.path())
    }
}

/// Transport trait for request/response communication with a backend.
///
/// This trait abstracts over the actual transport mechanism, allowing
/// for easy testing with fake implementations.
pub trait Transport: Send + Sync {
    /// Performs one call and returns the decoded JSON body.
    ///
    /// Empty bodies decode to `Value::Null`.
    fn query(&self, request: &Request) -> TransportResult<Value>;
}

/// HTTP transport implementation using a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base: Url,
}

impl HttpTransport {
    /// Creates a transport for `base_url` with `api_root` (e.g. `api/v4`)
    /// prepended to every request path.
    pub fn new(base_url: &str, api_root: &str, timeout: Duration) -> TransportResult<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| TransportError::Malformed(format!("{}: {}", base_url, e)))?;
        {
            let mut segments = base
                .path_segments_mut()
                .map_err(|_| TransportError::Malformed(format!("{} cannot be a base", base_url)))?;
            segments
                .pop_if_empty()
                .extend(api_root.split('/').filter(|s| !s.is_empty()));
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("tracksync/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        Ok(HttpTransport { client, base })
    }

    /// The full URL for a request, credentials in the query string included.
    pub fn url_for(&self, request: &Request) -> TransportResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::Malformed(self.base.to_string()))?
            .extend(request.segments());
        let mut pairs: Vec<(&str, &str)> = request
            .params
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect();
        if let Some(Auth::Query { name, value }) = &request.auth {
            pairs.push((name.as_str(), value.as_str()));
        }
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn query(&self, request: &Request) -> TransportResult<Value> {
        let url = self.url_for(request)?;
        debug!(verb = %request.verb, path = %request.path(), "remote query");

        let mut builder = self.client.request(request.verb.method(), url);
        match &request.auth {
            Some(Auth::Header { name, value }) => {
                builder = builder.header(name.as_str(), value.as_str());
            }
            Some(Auth::Basic { user, password }) => {
                builder = builder.basic_auth(user, Some(password));
            }
            Some(Auth::Query { .. }) | None => {}
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = text.len(), "remote response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: error_message(&text, status.canonical_reason()),
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Best-effort human message from an error body.
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error", "error_description"] {
            match value.get(key) {
                Some(Value::String(s)) => return s.clone(),
                Some(other) if !other.is_null() => return other.to_string(),
                _ => {}
            }
        }
        if let Some(messages) = value.get("errorMessages").and_then(Value::as_array) {
            let joined: Vec<&str> = messages.iter().filter_map(Value::as_str).collect();
            if !joined.is_empty() {
                return joined.join("; ");
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("request failed").to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
