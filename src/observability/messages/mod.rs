// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each diagnostic or operational event in the switchyard has a dedicated
//! message struct implementing `Display` plus [`StructuredLog`], which emits
//! the message through `tracing` at the level appropriate for that event.
//!
//! # Usage Pattern
//!
//! ```
//! use the_switchyard::observability::messages::node::ScriptEvalRequested;
//! use the_switchyard::observability::messages::StructuredLog;
//!
//! let msg = ScriptEvalRequested { node_id: "log_temperature" };
//! msg.log();
//! ```

use std::fmt::Display;

pub mod enrichment;
pub mod node;

/// Emit a message at its designated log level.
///
/// Implemented per message type so call sites never pick levels ad hoc.
pub trait StructuredLog: Display {
    fn log(&self);
}
