// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-msg failure causes carried by relay-failure.
//!
//! No error from processing a single msg may escape `on_msg` as an unhandled
//! fault: every failure path terminates in a relay-failure call carrying one
//! of these. `EntityNotFound` is an expected business outcome and is kept
//! distinguishable from `Collaborator` faults so downstream failure handlers
//! can branch differently on the two.

use std::time::Duration;
use thiserror::Error;

use crate::entities::{EntityRef, TargetScope};

/// Script execution failed inside the engine collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// The evaluation exceeded the engine's deadline.
    #[error("Script evaluation timed out after {0:?}")]
    Timeout(Duration),

    /// The script raised a runtime error.
    #[error("Script raised an error: {0}")]
    Script(String),

    /// The script completed but did not produce a string result.
    #[error("Script produced invalid output: {0}")]
    InvalidOutput(String),
}

/// A lookup/fetch collaborator service failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorFault {
    /// The service could not be reached or refused the call.
    #[error("{service} unavailable: {reason}")]
    Unavailable {
        service: &'static str,
        reason: String,
    },

    /// The service answered with data the node could not interpret.
    #[error("{service} returned a malformed response: {reason}")]
    Malformed {
        service: &'static str,
        reason: String,
    },
}

/// The cause attached to a relay-failure call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeFailure {
    /// Script evaluation failed; recovered locally, never escalated.
    #[error("Script evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Scope resolution found no target entity. Expected, non-exceptional.
    #[error("No {scope} entity found for {originator}")]
    EntityNotFound {
        scope: TargetScope,
        originator: EntityRef,
    },

    /// A collaborator service errored; the underlying cause is preserved.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorFault),

    /// An internal fault that still must surface through relay-failure.
    #[error("Unexpected node error: {0}")]
    Unexpected(String),
}
