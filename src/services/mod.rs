// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Collaborator service boundaries.
//!
//! The switchyard core does not implement script execution, entity lookup,
//! or attribute storage itself; it depends on them through the traits in this
//! module and treats them as external collaborators. `memory` carries
//! in-process implementations for demos and tests; `mock` carries
//! fault-injecting and manually-resolved doubles for tests.

mod attributes;
mod diagnostics;
mod entity;
mod script;

pub mod memory;
pub mod mock;

pub use attributes::{Attribute, AttributeScope, AttributeService};
pub use diagnostics::{DiagnosticEvent, Diagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use entity::EntityService;
pub use script::{ScriptEngine, ScriptEngineFactory};
