// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The single-fire relay protocol between a node and the chain scheduler.
//!
//! A node must relay every msg it receives exactly once, along exactly one
//! named outcome. Rather than nested callbacks, the contract is a one-shot
//! channel: the scheduler holds the receiver, the node's execution context
//! holds a [`RelayHandle`] whose send consumes it by move. Double-relay is
//! therefore a compile error, and a handle dropped without sending logs an
//! error-level message: the msg was lost, which the scheduler must never
//! let happen silently.

use tokio::sync::oneshot;

use crate::errors::NodeFailure;
use crate::msg::Msg;
use crate::observability::messages::node::{MsgRelayDropped, MsgRelayIgnored};
use crate::observability::messages::StructuredLog;

/// The outcome a msg was relayed along, as seen by the chain scheduler.
#[derive(Debug)]
pub enum Relayed {
    /// The msg proceeds to whatever is wired to the "success" outcome.
    Success(Msg),
    /// The msg proceeds to the "failure" outcome, carrying the cause.
    Failure(Msg, NodeFailure),
    /// The msg proceeds along a named custom outcome.
    Next(Msg, String),
}

impl Relayed {
    /// Label of the outcome, for logging.
    pub fn outcome_name(&self) -> &str {
        match self {
            Relayed::Success(_) => "success",
            Relayed::Failure(_, _) => "failure",
            Relayed::Next(_, link) => link,
        }
    }
}

/// Single-fire sender for one msg's relay outcome.
///
/// Created per node invocation via [`RelayHandle::channel`]. Sending takes
/// the handle by value; ownership makes the exactly-once invariant
/// mechanically checkable instead of a runtime convention.
pub struct RelayHandle {
    node_id: String,
    tx: Option<oneshot::Sender<Relayed>>,
}

impl RelayHandle {
    /// Create a handle/receiver pair for one msg, labelled with the node id.
    pub fn channel(node_id: impl Into<String>) -> (Self, oneshot::Receiver<Relayed>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                node_id: node_id.into(),
                tx: Some(tx),
            },
            rx,
        )
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Fire the relay. Consumes the handle; there is no second shot.
    pub fn send(mut self, outcome: Relayed) {
        // take() so Drop sees the handle as spent
        if let Some(tx) = self.tx.take() {
            let outcome_name = outcome.outcome_name().to_string();
            if tx.send(outcome).is_err() {
                MsgRelayIgnored {
                    node_id: &self.node_id,
                    outcome: &outcome_name,
                }
                .log();
            }
        }
    }
}

impl Drop for RelayHandle {
    fn drop(&mut self) {
        if self.tx.is_some() {
            MsgRelayDropped {
                node_id: &self.node_id,
            }
            .log();
        }
    }
}
