// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::entities::EntityRef;
use crate::errors::CollaboratorFault;

/// Asynchronous entity-ownership lookup.
///
/// `Ok(None)` means the entity legitimately has no owner (e.g. a device with
/// no assigned group), an expected outcome, structurally distinct from
/// `Err`, which means the collaborator itself failed. Scope resolution maps
/// the former to `EntityNotFound` and the latter to a collaborator fault.
#[async_trait]
pub trait EntityService: Send + Sync {
    /// Find the immediate owner one level up the ownership hierarchy.
    async fn find_owner(&self, entity: &EntityRef)
        -> Result<Option<EntityRef>, CollaboratorFault>;
}
