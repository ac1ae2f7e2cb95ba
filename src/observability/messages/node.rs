// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for node lifecycle, script evaluation, and relay events.

use std::fmt::{Display, Formatter};

use super::StructuredLog;

/// A node finished initialization and is ready to process msgs.
///
/// # Log Level
/// `info!` - Important operational event
pub struct NodeInitialized<'a> {
    pub node_id: &'a str,
    pub kind: &'a str,
}

impl Display for NodeInitialized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' ({}) initialized and ready",
            self.node_id, self.kind
        )
    }
}

impl StructuredLog for NodeInitialized<'_> {
    fn log(&self) {
        tracing::info!("{}", self);
    }
}

/// A node released its resources at chain teardown.
///
/// # Log Level
/// `debug!` - Routine lifecycle detail
pub struct NodeDestroyed<'a> {
    pub node_id: &'a str,
}

impl Display for NodeDestroyed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Node '{}' destroyed", self.node_id)
    }
}

impl StructuredLog for NodeDestroyed<'_> {
    fn log(&self) {
        tracing::debug!("{}", self);
    }
}

/// A script evaluation was submitted to the engine collaborator.
///
/// # Log Level
/// `debug!` - High-volume per-msg event
///
/// # Example
/// ```
/// use the_switchyard::observability::messages::node::ScriptEvalRequested;
/// use the_switchyard::observability::messages::StructuredLog;
///
/// ScriptEvalRequested { node_id: "log_temperature" }.log();
/// ```
pub struct ScriptEvalRequested<'a> {
    pub node_id: &'a str,
}

impl Display for ScriptEvalRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Node '{}' requested script evaluation", self.node_id)
    }
}

impl StructuredLog for ScriptEvalRequested<'_> {
    fn log(&self) {
        tracing::debug!("{}", self);
    }
}

/// A script evaluation completed, successfully or not.
///
/// Always emitted before the relay call, so the requested/responded pair
/// brackets the relay outcome for observers.
///
/// # Log Level
/// `debug!` - High-volume per-msg event
pub struct ScriptEvalResponded<'a> {
    pub node_id: &'a str,
}

impl Display for ScriptEvalResponded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Node '{}' received script evaluation response", self.node_id)
    }
}

impl StructuredLog for ScriptEvalResponded<'_> {
    fn log(&self) {
        tracing::debug!("{}", self);
    }
}

/// A transform-and-log node emitted its derived string.
///
/// # Log Level
/// `info!` - The whole point of the log node
pub struct ScriptOutputEmitted<'a> {
    pub node_id: &'a str,
    pub output: &'a str,
}

impl Display for ScriptOutputEmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] {}", self.node_id, self.output)
    }
}

impl StructuredLog for ScriptOutputEmitted<'_> {
    fn log(&self) {
        tracing::info!("{}", self);
    }
}

/// A relay handle was dropped without any relay call.
///
/// This is a contract violation: a msg handed to a node must be relayed
/// exactly once. The msg is lost to the chain.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct MsgRelayDropped<'a> {
    pub node_id: &'a str,
}

impl Display for MsgRelayDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' dropped a msg without relaying it to any outcome",
            self.node_id
        )
    }
}

impl StructuredLog for MsgRelayDropped<'_> {
    fn log(&self) {
        tracing::error!("{}", self);
    }
}

/// A relay call fired but the scheduler side of the channel was gone.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
pub struct MsgRelayIgnored<'a> {
    pub node_id: &'a str,
    pub outcome: &'a str,
}

impl Display for MsgRelayIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' relayed to '{}' but no receiver was listening",
            self.node_id, self.outcome
        )
    }
}

impl StructuredLog for MsgRelayIgnored<'_> {
    fn log(&self) {
        tracing::warn!("{}", self);
    }
}
