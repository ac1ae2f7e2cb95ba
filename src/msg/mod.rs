// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The event envelope flowing through rule nodes.
//!
//! A [`Msg`] carries an originator reference, an opaque JSON payload, and a
//! mutable string-to-string metadata map. Nodes that do not interpret the
//! payload must forward it untouched; enrichment nodes add keys to the
//! metadata. Once a msg is handed to a node it is relayed exactly once,
//! never dropped silently and never forwarded twice (see the `relay` module).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::EntityRef;

/// Ordered-irrelevant, unique-key metadata attached to a msg.
///
/// Newtype over `HashMap<String, String>`; last write wins on duplicate keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MsgMetadata(pub HashMap<String, String>);

impl MsgMetadata {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl From<HashMap<String, String>> for MsgMetadata {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// The unit of work flowing through rule nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Msg {
    /// String discriminator some nodes use to decide relevance.
    pub msg_type: String,
    /// The entity that produced this event. Immutable for the msg's lifetime.
    pub originator: EntityRef,
    /// Opaque structured data; nodes that don't interpret it pass it through.
    pub payload: serde_json::Value,
    /// Mutable metadata; enrichment nodes insert keys here.
    pub metadata: MsgMetadata,
}

impl Msg {
    pub fn new(
        msg_type: impl Into<String>,
        originator: EntityRef,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            msg_type: msg_type.into(),
            originator,
            payload,
            metadata: MsgMetadata::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: MsgMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
