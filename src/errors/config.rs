// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while loading chain configuration or initializing nodes.
//!
//! Configuration failures are the only errors allowed to fail loudly: they
//! occur at chain-assembly time, before any msg is in flight. A node whose
//! `init` returns one of these never processes events.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed or unusable node/chain configuration.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The chain configuration file could not be read.
    #[error("Failed to read chain configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The chain configuration file is not valid YAML.
    #[error("Invalid chain configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A node's raw configuration blob failed to decode into its typed form.
    #[error("Invalid node configuration: {0}")]
    Decode(#[from] serde_json::Error),

    /// Two nodes in the chain share the same id.
    #[error("Duplicate node id: '{node_id}'")]
    DuplicateNodeId { node_id: String },

    /// A node was configured with an empty id.
    #[error("Node at position {position} has an empty id")]
    EmptyNodeId { position: usize },

    /// A script-evaluating node was configured with a blank script.
    #[error("A non-empty script is required")]
    EmptyScript,

    /// The script engine factory refused to compile the configured script.
    #[error("Script rejected by engine: {reason}")]
    ScriptRejected { reason: String },
}
