use async_trait::async_trait;

use crate::context::{MsgContext, ServiceCatalog};
use crate::errors::ConfigurationError;
use crate::msg::Msg;

/// The contract every rule node honors.
///
/// Lifecycle: `init` once at chain assembly, `on_msg` many times (possibly
/// concurrently; a node is shared as `Arc<dyn RuleNode>` and per-event state
/// lives in the `on_msg` future, never in node fields), `destroy` once at
/// teardown. `destroy` is idempotent and must release anything `init`
/// acquired, even if no msg was ever processed.
///
/// `on_msg` must end every code path, synchronous or suspended, with exactly
/// one relay call on the context. Internal faults are surfaced through
/// `tell_failure`, never by panicking: an unhandled fault must not stall or
/// corrupt sibling msgs in the same chain.
#[async_trait]
pub trait RuleNode: Send + Sync {
    /// Validate and bind static configuration; may acquire long-lived
    /// resources such as a compiled script engine. On error, nothing
    /// acquired remains held and the node never processes msgs.
    fn init(
        &mut self,
        services: &ServiceCatalog,
        raw_config: &serde_json::Value,
    ) -> Result<(), ConfigurationError>;

    /// Process one msg and relay it exactly once via `ctx`.
    async fn on_msg(&self, ctx: MsgContext, msg: Msg);

    /// Release resources acquired in `init`. Idempotent.
    fn destroy(&mut self);

    /// The node kind's label, used in logs and factory wiring.
    fn name(&self) -> &'static str;
}
