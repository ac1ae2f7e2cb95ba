// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Transform-and-log node: evaluate a configured script against the msg,
//! emit the derived string to the diagnostic sink, relay the original msg.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::{MsgContext, ServiceCatalog};
use crate::errors::ConfigurationError;
use crate::msg::Msg;
use crate::observability::messages::node::{NodeDestroyed, NodeInitialized};
use crate::observability::messages::StructuredLog;
use crate::services::ScriptEngine;
use crate::traits::RuleNode;

/// Configuration for the script-log node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptLogConfig {
    /// Script text, compiled once at init. Must be non-empty.
    pub script: String,
}

/// Evaluates a script per msg and logs the result.
///
/// The script output is side-channel only: on success the msg is relayed
/// unmodified, payload and metadata untouched. On evaluation failure the msg
/// relays to the failure outcome carrying the evaluation's cause. No retries
/// happen at this layer; retry policy belongs to the chain scheduler.
#[derive(Default)]
pub struct ScriptLogNode {
    engine: Option<Box<dyn ScriptEngine>>,
}

impl ScriptLogNode {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RuleNode for ScriptLogNode {
    fn init(
        &mut self,
        services: &ServiceCatalog,
        raw_config: &serde_json::Value,
    ) -> Result<(), ConfigurationError> {
        let config: ScriptLogConfig = serde_json::from_value(raw_config.clone())?;
        if config.script.trim().is_empty() {
            return Err(ConfigurationError::EmptyScript);
        }

        self.engine = Some(services.script_engines.create_engine(&config.script)?);

        NodeInitialized {
            node_id: self.name(),
            kind: "transform",
        }
        .log();
        Ok(())
    }

    async fn on_msg(&self, ctx: MsgContext, msg: Msg) {
        let Some(engine) = self.engine.as_ref() else {
            let cause = crate::errors::NodeFailure::Unexpected(
                "script_log node used before init or after destroy".to_string(),
            );
            ctx.tell_failure(msg, cause);
            return;
        };

        ctx.diagnostics().script_eval_requested(ctx.node_id());
        let result = engine.execute_to_string(&msg).await;
        // Responded fires before the relay so the requested/responded pair
        // brackets the outcome for observers, success or failure alike.
        ctx.diagnostics().script_eval_responded(ctx.node_id());

        match result {
            Ok(line) => {
                ctx.diagnostics().emit(ctx.node_id(), &line);
                ctx.tell_success(msg);
            }
            Err(cause) => ctx.tell_failure(msg, cause.into()),
        }
    }

    fn destroy(&mut self) {
        // Idempotent: only the call that actually releases the engine logs.
        if self.engine.take().is_some() {
            NodeDestroyed {
                node_id: self.name(),
            }
            .log();
        }
    }

    fn name(&self) -> &'static str {
        "script_log"
    }
}
