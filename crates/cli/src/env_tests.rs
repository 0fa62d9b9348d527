// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

#[test]
fn test_vars_constants() {
    assert_eq!(vars::TSYNC_CONFIG, "TSYNC_CONFIG");
    assert_eq!(vars::TSYNC_TOKEN, "TSYNC_TOKEN");
    assert_eq!(vars::TSYNC_OAUTH, "TSYNC_OAUTH");
    assert_eq!(vars::TSYNC_LOGIN, "TSYNC_LOGIN");
    assert_eq!(vars::TSYNC_PASSWORD, "TSYNC_PASSWORD");
    assert_eq!(vars::TSYNC_LOG, "TSYNC_LOG");
}

#[test]
fn test_config_path_set() {
    std::env::set_var("TSYNC_CONFIG", "/tmp/tsync-test.toml");
    assert_eq!(config_path(), Some(PathBuf::from("/tmp/tsync-test.toml")));
    std::env::remove_var("TSYNC_CONFIG");
    assert_eq!(config_path(), None);
}

#[test]
fn test_oauth_empty_is_unset() {
    std::env::set_var("TSYNC_OAUTH", "");
    assert_eq!(oauth(), None);
    std::env::set_var("TSYNC_OAUTH", "abc");
    assert_eq!(oauth().as_deref(), Some("abc"));
    std::env::remove_var("TSYNC_OAUTH");
}

#[test]
fn test_log_filter() {
    std::env::remove_var("TSYNC_LOG");
    assert_eq!(log_filter(), None);
    std::env::set_var("TSYNC_LOG", "tracksync=debug");
    assert_eq!(log_filter().as_deref(), Some("tracksync=debug"));
    std::env::remove_var("TSYNC_LOG");
}
