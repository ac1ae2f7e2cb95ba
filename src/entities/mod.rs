// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Entity references and enrichment target scopes.
//!
//! Every event carries an originator: a reference to the entity that produced
//! it. Entities form a strict ownership hierarchy: devices and assets belong
//! to a group, groups belong to a tenant, users belong directly to a tenant.
//! Events do not carry ancestor identifiers, so resolving an ancestor always
//! goes through the entity service.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The closed set of entity kinds relevant to enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Device,
    Asset,
    User,
    Group,
    Tenant,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Device => "device",
            EntityKind::Asset => "asset",
            EntityKind::User => "user",
            EntityKind::Group => "group",
            EntityKind::Tenant => "tenant",
        };
        write!(f, "{}", label)
    }
}

/// A (kind, identifier) pair naming exactly one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: Uuid,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: Uuid) -> Self {
        Self { kind, id }
    }

    /// Convenience constructor with a freshly generated identifier.
    pub fn random(kind: EntityKind) -> Self {
        Self::new(kind, Uuid::new_v4())
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.id)
    }
}

/// How an enrichment node finds its target entity from the originator.
///
/// The set is closed on purpose: resolution dispatches with an exhaustive
/// match, so adding a scope is a compile-checked update to every resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetScope {
    /// The originator itself; no lookup required.
    Originator,
    /// The group that owns the originator.
    OwningGroup,
    /// The tenant at the top of the originator's ownership chain.
    OwningTenant,
}

impl fmt::Display for TargetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TargetScope::Originator => "originator",
            TargetScope::OwningGroup => "owning_group",
            TargetScope::OwningTenant => "owning_tenant",
        };
        write!(f, "{}", label)
    }
}
