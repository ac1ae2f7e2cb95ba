// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod node;

pub use config::ConfigurationError;
pub use node::{CollaboratorFault, EvaluationError, NodeFailure};
