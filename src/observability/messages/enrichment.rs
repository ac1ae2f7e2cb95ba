// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for enrichment target resolution and attribute merging.

use std::fmt::{Display, Formatter};

use super::StructuredLog;
use crate::entities::{EntityRef, TargetScope};
use crate::errors::NodeFailure;

/// Scope resolution produced a target entity.
///
/// # Log Level
/// `debug!` - High-volume per-msg event
pub struct TargetResolved<'a> {
    pub node_id: &'a str,
    pub scope: TargetScope,
    pub target: EntityRef,
}

impl Display for TargetResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' resolved {} target to {}",
            self.node_id, self.scope, self.target
        )
    }
}

impl StructuredLog for TargetResolved<'_> {
    fn log(&self) {
        tracing::debug!("{}", self);
    }
}

/// Scope resolution failed, either not-found or a collaborator fault.
///
/// # Log Level
/// `warn!` - Expected for unassigned entities, still worth surfacing
pub struct TargetResolutionFailed<'a> {
    pub node_id: &'a str,
    pub scope: TargetScope,
    pub cause: &'a NodeFailure,
}

impl Display for TargetResolutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' failed to resolve {} target: {}",
            self.node_id, self.scope, self.cause
        )
    }
}

impl StructuredLog for TargetResolutionFailed<'_> {
    fn log(&self) {
        tracing::warn!("{}", self);
    }
}

/// Fetched attributes were merged into a msg's metadata.
///
/// # Log Level
/// `debug!` - High-volume per-msg event
pub struct AttributesMerged<'a> {
    pub node_id: &'a str,
    pub target: EntityRef,
    pub merged: usize,
}

impl Display for AttributesMerged<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' merged {} attribute(s) from {} into msg metadata",
            self.node_id, self.merged, self.target
        )
    }
}

impl StructuredLog for AttributesMerged<'_> {
    fn log(&self) {
        tracing::debug!("{}", self);
    }
}

/// The attribute fetch stage failed after a target had been resolved.
///
/// # Log Level
/// `warn!` - Collaborator trouble; the msg still relays to failure
pub struct AttributeFetchFailed<'a> {
    pub node_id: &'a str,
    pub target: EntityRef,
    pub cause: &'a NodeFailure,
}

impl Display for AttributeFetchFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' failed to fetch attributes for {}: {}",
            self.node_id, self.target, self.cause
        )
    }
}

impl StructuredLog for AttributeFetchFailed<'_> {
    fn log(&self) {
        tracing::warn!("{}", self);
    }
}
