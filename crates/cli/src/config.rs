// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection configuration.
//!
//! Configuration is a TOML file naming the backend, its base URL and the
//! credentials to use. The file is located by, in order: the `--config`
//! flag, `TSYNC_CONFIG`, `./tracksync.toml`, then
//! `<config dir>/tracksync/config.toml`. Secrets in the file can be
//! overridden by `TSYNC_TOKEN`, `TSYNC_OAUTH`, `TSYNC_LOGIN` and
//! `TSYNC_PASSWORD`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::Backend;
use crate::env;
use crate::error::{Error, Result};
use crate::session::Credentials;
use crate::store::DEFAULT_PAGE_SIZE;

pub const CONFIG_FILE_NAME: &str = "tracksync.toml";
const CONFIG_DIR_NAME: &str = "tracksync";
const USER_CONFIG_FILE_NAME: &str = "config.toml";

/// Connection settings for one backend.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub backend: Backend,
    /// Base URL of the server, e.g. `https://gitlab.example.com`.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Whether missing parents may be discovered by enumeration.
    #[serde(default = "default_discovery")]
    pub discovery: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_discovery() -> bool {
    true
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("backend", &self.backend)
            .field("url", &self.url)
            .field("api_version", &self.api_version)
            .field("credentials", &self.credentials())
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .field("discovery", &self.discovery)
            .finish()
    }
}

impl Config {
    /// A config with defaults for everything but the backend and URL.
    pub fn new(backend: Backend, url: impl Into<String>) -> Self {
        Config {
            backend,
            url: url.into(),
            api_version: None,
            token: None,
            oauth: None,
            login: None,
            email: None,
            password: None,
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            discovery: default_discovery(),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if config.url.trim().is_empty() {
            return Err(Error::Config("url must not be empty".to_string()));
        }
        Ok(config)
    }

    /// Loads configuration from the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config {}: {}", path.display(), e))
        })?;
        Config::parse(&content)
    }

    /// Locates, loads and applies environment overrides.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = find_config(explicit)?;
        let mut config = Config::load(&path)?;
        config.apply_env();
        Ok(config)
    }

    /// Replaces secrets with any set in the environment.
    pub fn apply_env(&mut self) {
        if let Some(token) = env::token() {
            self.token = Some(token);
        }
        if let Some(oauth) = env::oauth() {
            self.oauth = Some(oauth);
        }
        if let Some(login) = env::login() {
            self.login = Some(login);
        }
        if let Some(password) = env::password() {
            self.password = Some(password);
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            token: self.token.clone(),
            oauth: self.oauth.clone(),
            login: self.login.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Paths searched for a config file, most specific first.
pub fn search_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    if let Some(path) = env::config_path() {
        return vec![path];
    }
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(CONFIG_DIR_NAME).join(USER_CONFIG_FILE_NAME));
    }
    paths
}

/// Finds the config file to use.
///
/// An explicit path or `TSYNC_CONFIG` is returned as is, so a missing file
/// is reported when loading it.
pub fn find_config(explicit: Option<&Path>) -> Result<PathBuf> {
    let paths = search_paths(explicit);
    if explicit.is_some() || env::config_path().is_some() {
        if let Some(path) = paths.into_iter().next() {
            return Ok(path);
        }
    } else if let Some(path) = paths.iter().find(|p| p.is_file()) {
        return Ok(path.clone());
    }
    Err(Error::Config(format!(
        "no configuration found\n  hint: create {} or pass --config <path>",
        CONFIG_FILE_NAME
    )))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
