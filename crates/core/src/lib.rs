// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ts-core: entity model for tracksync
//!
//! This crate provides the entity types, identifiers, scope addressing and
//! query matching shared by every tracksync backend. It performs no I/O.

pub mod convert;
pub mod entity;
pub mod error;
pub mod id;
pub mod kind;
pub mod query;
pub mod scope;

pub use convert::Fields;
pub use entity::{
    Account, Comment, Entity, Group, Issue, IssueState, Label, Member, MembershipDelta, Milestone,
    Project, Record, Reference,
};
pub use error::{ConversionError, Error, Result};
pub use id::{split_global_name, EntityId, GlobalId};
pub use kind::EntityKind;
pub use query::Query;
pub use scope::{Address, ScopeChain};
