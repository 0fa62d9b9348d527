// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Credentials and the cached session token.
//!
//! A session starts from configured [`Credentials`]. Static credentials
//! (token, OAuth) are attached as-is. A login plus password is either sent as
//! HTTP basic auth or, on backends with a session endpoint, exchanged once for
//! a token that is cached and attached to later requests.

use std::fmt;
use std::sync::RwLock;
use tracing::info;

use crate::backend::Dialect;
use crate::error::Result;
use crate::transport::{Request, Transport};

/// Configured secrets. Any combination may be present.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub oauth: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("Credentials")
            .field("token", &mask(&self.token))
            .field("oauth", &mask(&self.oauth))
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password", &mask(&self.password))
            .finish()
    }
}

impl Credentials {
    /// Login name for password authentication: the login, else the email.
    pub fn user(&self) -> Option<&str> {
        self.login.as_deref().or(self.email.as_deref())
    }

    /// True when a login or email plus password is the only way in.
    pub fn needs_login(&self) -> bool {
        self.token.is_none() && self.oauth.is_none() && self.user().is_some() && self.password.is_some()
    }
}

/// The credential to attach to the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Token(String),
    OAuth(String),
    /// A token obtained from the backend's session endpoint.
    Session(String),
    Basic { user: String, password: String },
    Anonymous,
}

/// One logical session: configured credentials plus a cached login token.
#[derive(Debug)]
pub struct Session {
    credentials: Credentials,
    token: RwLock<Option<String>>,
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Session {
            credentials,
            token: RwLock::new(None),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn cached_token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn store_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    /// Drops the cached session token.
    pub fn invalidate(&self) {
        self.store_token(None);
    }

    /// True if a rejected request can be retried after logging in again.
    pub fn renewable(&self, dialect: &dyn Dialect) -> bool {
        self.credentials.needs_login() && self.login_request(dialect).is_some()
    }

    fn login_request(&self, dialect: &dyn Dialect) -> Option<Request> {
        let user = self.credentials.user()?;
        let password = self.credentials.password.as_deref()?;
        dialect.login(user, password)
    }

    /// Performs the login call and caches the returned token.
    ///
    /// Does nothing on backends without a session endpoint or when static
    /// credentials are configured.
    pub fn login(&self, dialect: &dyn Dialect, transport: &dyn Transport) -> Result<()> {
        if !self.credentials.needs_login() {
            return Ok(());
        }
        let Some(request) = self.login_request(dialect) else {
            return Ok(());
        };
        info!(backend = dialect.name(), user = ?self.credentials.user(), "logging in");
        let response = transport.query(&request)?;
        let token = dialect.session_token(&response)?;
        self.store_token(Some(token));
        Ok(())
    }

    /// The credential to use right now, without any I/O.
    pub fn credential(&self) -> Credential {
        let creds = &self.credentials;
        if let Some(token) = &creds.token {
            return Credential::Token(token.clone());
        }
        if let Some(oauth) = &creds.oauth {
            return Credential::OAuth(oauth.clone());
        }
        if let Some(token) = self.cached_token() {
            return Credential::Session(token);
        }
        match (creds.user(), &creds.password) {
            (Some(user), Some(password)) => Credential::Basic {
                user: user.to_string(),
                password: password.clone(),
            },
            _ => Credential::Anonymous,
        }
    }

    /// Attaches credentials to `request`, logging in first if a session
    /// token is needed and not cached yet.
    pub fn authorize(
        &self,
        dialect: &dyn Dialect,
        transport: &dyn Transport,
        request: &mut Request,
    ) -> Result<()> {
        if self.cached_token().is_none() && self.renewable(dialect) {
            self.login(dialect, transport)?;
        }
        request.auth = dialect.authorize(&self.credential());
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
