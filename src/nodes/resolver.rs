//! Scope dispatch: finding the enrichment target from a msg's originator.

use crate::entities::{EntityKind, EntityRef, TargetScope};
use crate::errors::NodeFailure;
use crate::services::EntityService;

/// Ownership chains are at most two levels below the tenant
/// (device/asset -> group -> tenant, user -> tenant).
const MAX_OWNER_HOPS: usize = 2;

/// Resolve the target entity for the given scope.
///
/// `Originator` needs no lookup. `OwningGroup` is one owner hop;
/// `OwningTenant` walks the ownership chain until it reaches a tenant. A
/// chain that ends (or lands on the wrong kind) is `EntityNotFound`, an
/// expected outcome for unassigned entities, while a failing entity service
/// propagates as a distinguishable collaborator fault.
pub async fn resolve_target(
    entities: &dyn EntityService,
    scope: TargetScope,
    originator: &EntityRef,
) -> Result<EntityRef, NodeFailure> {
    match scope {
        TargetScope::Originator => Ok(*originator),

        TargetScope::OwningGroup => {
            if originator.kind == EntityKind::Group {
                return Ok(*originator);
            }
            match entities.find_owner(originator).await? {
                Some(owner) if owner.kind == EntityKind::Group => Ok(owner),
                // A user's owner is its tenant; there is no group to find.
                Some(_) | None => Err(NodeFailure::EntityNotFound {
                    scope,
                    originator: *originator,
                }),
            }
        }

        TargetScope::OwningTenant => {
            if originator.kind == EntityKind::Tenant {
                return Ok(*originator);
            }
            let mut current = *originator;
            for _ in 0..MAX_OWNER_HOPS {
                match entities.find_owner(&current).await? {
                    Some(owner) if owner.kind == EntityKind::Tenant => return Ok(owner),
                    Some(owner) => current = owner,
                    None => break,
                }
            }
            Err(NodeFailure::EntityNotFound {
                scope,
                originator: *originator,
            })
        }
    }
}
