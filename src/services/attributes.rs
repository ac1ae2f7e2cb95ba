// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::EntityRef;
use crate::errors::CollaboratorFault;

/// Which side of the attribute store a key/value lives on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeScope {
    /// Server-side attributes, written by the platform.
    #[default]
    Server,
    /// Shared attributes, visible to both server and client.
    Shared,
}

/// One fetched key/value with its source scope. Transient: merged into a
/// msg's metadata and then discarded, no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
    pub scope: AttributeScope,
}

/// Asynchronous attribute fetch for a resolved target entity.
#[async_trait]
pub trait AttributeService: Send + Sync {
    /// Fetch the entity's attributes in the given scope.
    ///
    /// An empty `keys` slice means "all available attributes", never "none".
    /// Keys requested but absent on the entity are simply not returned;
    /// absence is not an error.
    async fn find_attributes(
        &self,
        entity: &EntityRef,
        scope: AttributeScope,
        keys: &[String],
    ) -> Result<Vec<Attribute>, CollaboratorFault>;
}
