// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-invocation execution context handed to `on_msg`.
//!
//! The context bundles the collaborator services with the single-fire relay
//! handle for one msg. The three `tell_*` operations consume the context, so
//! a node cannot relay the same msg twice, and the relay handle's drop guard
//! catches the opposite violation, an `on_msg` path that never relays.

use std::sync::Arc;

use crate::errors::NodeFailure;
use crate::msg::Msg;
use crate::relay::{RelayHandle, Relayed};
use crate::services::{
    AttributeService, Diagnostics, EntityService, ScriptEngineFactory, TracingDiagnostics,
};

/// The collaborator services a chain makes available to its nodes.
///
/// Shared across all nodes and invocations; individual collaborators are
/// behind `Arc<dyn …>` so deployments can swap implementations per service.
#[derive(Clone)]
pub struct ServiceCatalog {
    pub script_engines: Arc<dyn ScriptEngineFactory>,
    pub entities: Arc<dyn EntityService>,
    pub attributes: Arc<dyn AttributeService>,
    pub diagnostics: Arc<dyn Diagnostics>,
}

impl ServiceCatalog {
    pub fn new(
        script_engines: Arc<dyn ScriptEngineFactory>,
        entities: Arc<dyn EntityService>,
        attributes: Arc<dyn AttributeService>,
    ) -> Self {
        Self {
            script_engines,
            entities,
            attributes,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

/// Handle for exactly one node invocation over exactly one msg.
pub struct MsgContext {
    node_id: String,
    services: Arc<ServiceCatalog>,
    relay: RelayHandle,
}

impl MsgContext {
    /// Build the context for one invocation; the returned receiver is the
    /// scheduler's end of the relay protocol.
    pub fn new(
        node_id: impl Into<String>,
        services: Arc<ServiceCatalog>,
    ) -> (Self, tokio::sync::oneshot::Receiver<Relayed>) {
        let node_id = node_id.into();
        let (relay, rx) = RelayHandle::channel(node_id.clone());
        (
            Self {
                node_id,
                services,
                relay,
            },
            rx,
        )
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn services(&self) -> &ServiceCatalog {
        &self.services
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.services.diagnostics.as_ref()
    }

    /// Relay the msg to the "success" outcome.
    pub fn tell_success(self, msg: Msg) {
        self.relay.send(Relayed::Success(msg));
    }

    /// Relay the msg to the "failure" outcome, carrying the cause.
    pub fn tell_failure(self, msg: Msg, cause: NodeFailure) {
        self.relay.send(Relayed::Failure(msg, cause));
    }

    /// Relay the msg along a named custom outcome.
    pub fn tell_next(self, msg: Msg, link: impl Into<String>) {
        self.relay.send(Relayed::Next(msg, link.into()));
    }
}
