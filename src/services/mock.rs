//! Fault-injecting and manually-resolved collaborator doubles.
//!
//! Used by the property-style tests: `Failing*` services make every call
//! error with a fixed fault, and [`ManualScriptEngine`] parks evaluations
//! until the test resolves them, in any order, which is how the
//! out-of-submission-order completion guarantees are exercised.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use crate::entities::EntityRef;
use crate::errors::{CollaboratorFault, ConfigurationError, EvaluationError};
use crate::msg::Msg;
use crate::services::{
    Attribute, AttributeScope, AttributeService, EntityService, ScriptEngine, ScriptEngineFactory,
};

/// Entity service whose every lookup fails with the configured fault.
pub struct FailingEntityService {
    fault: CollaboratorFault,
}

impl FailingEntityService {
    pub fn new(fault: CollaboratorFault) -> Self {
        Self { fault }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(CollaboratorFault::Unavailable {
            service: "entity-service",
            reason: reason.into(),
        })
    }
}

#[async_trait]
impl EntityService for FailingEntityService {
    async fn find_owner(
        &self,
        _entity: &EntityRef,
    ) -> Result<Option<EntityRef>, CollaboratorFault> {
        Err(self.fault.clone())
    }
}

/// Attribute service whose every fetch fails with the configured fault.
pub struct FailingAttributeService {
    fault: CollaboratorFault,
}

impl FailingAttributeService {
    pub fn new(fault: CollaboratorFault) -> Self {
        Self { fault }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(CollaboratorFault::Unavailable {
            service: "attribute-service",
            reason: reason.into(),
        })
    }
}

#[async_trait]
impl AttributeService for FailingAttributeService {
    async fn find_attributes(
        &self,
        _entity: &EntityRef,
        _scope: AttributeScope,
        _keys: &[String],
    ) -> Result<Vec<Attribute>, CollaboratorFault> {
        Err(self.fault.clone())
    }
}

/// One evaluation waiting for the test to resolve it.
pub struct PendingEval {
    originator: EntityRef,
    tx: oneshot::Sender<Result<String, EvaluationError>>,
}

impl PendingEval {
    /// Originator of the msg that triggered this evaluation, so tests can
    /// pair completions with submissions.
    pub fn originator(&self) -> EntityRef {
        self.originator
    }

    /// Complete the evaluation with the given result.
    pub fn resolve(self, result: Result<String, EvaluationError>) {
        // Receiver dropping first just means the invocation was abandoned.
        let _ = self.tx.send(result);
    }
}

/// Script engine that queues evaluations until the test resolves them.
///
/// Clones share the same queue, so the factory can hand the node a clone
/// while the test keeps another to drive completions.
#[derive(Clone, Default)]
pub struct ManualScriptEngine {
    pending: Arc<Mutex<Vec<PendingEval>>>,
}

impl ManualScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Drain all parked evaluations, in submission order.
    pub fn take_pending(&self) -> Vec<PendingEval> {
        std::mem::take(&mut *self.pending.lock().unwrap())
    }
}

#[async_trait]
impl ScriptEngine for ManualScriptEngine {
    async fn execute_to_string(&self, msg: &Msg) -> Result<String, EvaluationError> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push(PendingEval {
            originator: msg.originator,
            tx,
        });

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(EvaluationError::Script("evaluation abandoned".to_string())),
        }
    }
}

/// Factory that always hands out clones of one shared [`ManualScriptEngine`].
pub struct ManualScriptEngineFactory {
    engine: ManualScriptEngine,
}

impl ManualScriptEngineFactory {
    pub fn new() -> Self {
        Self {
            engine: ManualScriptEngine::new(),
        }
    }

    /// A handle onto the same queue the node's engine uses.
    pub fn engine(&self) -> ManualScriptEngine {
        self.engine.clone()
    }
}

impl Default for ManualScriptEngineFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEngineFactory for ManualScriptEngineFactory {
    fn create_engine(&self, _script: &str) -> Result<Box<dyn ScriptEngine>, ConfigurationError> {
        Ok(Box::new(self.engine.clone()))
    }
}
