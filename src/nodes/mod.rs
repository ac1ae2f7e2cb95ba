// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod enrichment;
mod factory;
mod log;
pub mod resolver;

#[cfg(test)]
mod integration_tests;

pub use enrichment::{GetAttributesConfig, GetAttributesNode};
pub use factory::{NodeFactory, NodeKind};
pub use log::{ScriptLogConfig, ScriptLogNode};
