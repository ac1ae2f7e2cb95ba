// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::{ConfigurationError, EvaluationError};
use crate::msg::Msg;

/// A compiled script, owned by one node instance.
///
/// The engine is created once at `init` and only read by concurrent `on_msg`
/// invocations; only `init`/`destroy` may replace it. Evaluation runs on the
/// collaborator's side and completes asynchronously.
#[async_trait]
pub trait ScriptEngine: Send + Sync {
    /// Evaluate the script against the msg, producing a derived string.
    async fn execute_to_string(&self, msg: &Msg) -> Result<String, EvaluationError>;
}

/// Compiles script text into engine instances at node-initialization time.
///
/// A compile failure is a [`ConfigurationError`]: the node never processes
/// events, and nothing was acquired that `destroy` would need to release.
pub trait ScriptEngineFactory: Send + Sync {
    fn create_engine(&self, script: &str) -> Result<Box<dyn ScriptEngine>, ConfigurationError>;
}
