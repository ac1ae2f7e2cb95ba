// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process collaborator implementations.
//!
//! These back the demo binary and the integration tests: a fixed-topology
//! entity service, a per-entity attribute store, and a placeholder-template
//! "script" engine. None of them are meant for production use; real
//! deployments supply their own collaborators behind the service traits.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::entities::EntityRef;
use crate::errors::{CollaboratorFault, ConfigurationError, EvaluationError};
use crate::msg::Msg;
use crate::services::{
    Attribute, AttributeScope, AttributeService, EntityService, ScriptEngine, ScriptEngineFactory,
};

/// Entity service over an explicit set of ownership edges.
#[derive(Debug, Default)]
pub struct InMemoryEntityService {
    owners: HashMap<EntityRef, EntityRef>,
}

impl InMemoryEntityService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `owner` owns `child`.
    pub fn with_owner(mut self, child: EntityRef, owner: EntityRef) -> Self {
        self.owners.insert(child, owner);
        self
    }
}

#[async_trait]
impl EntityService for InMemoryEntityService {
    async fn find_owner(
        &self,
        entity: &EntityRef,
    ) -> Result<Option<EntityRef>, CollaboratorFault> {
        Ok(self.owners.get(entity).copied())
    }
}

/// Attribute store keyed by (entity, scope).
#[derive(Debug, Default)]
pub struct InMemoryAttributeService {
    attributes: HashMap<(EntityRef, AttributeScope), Vec<Attribute>>,
}

impl InMemoryAttributeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attribute on an entity.
    pub fn with_attribute(
        mut self,
        entity: EntityRef,
        scope: AttributeScope,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes
            .entry((entity, scope))
            .or_default()
            .push(Attribute {
                key: key.into(),
                value: value.into(),
                scope,
            });
        self
    }
}

#[async_trait]
impl AttributeService for InMemoryAttributeService {
    async fn find_attributes(
        &self,
        entity: &EntityRef,
        scope: AttributeScope,
        keys: &[String],
    ) -> Result<Vec<Attribute>, CollaboratorFault> {
        let stored = self
            .attributes
            .get(&(*entity, scope))
            .cloned()
            .unwrap_or_default();

        // Empty key filter means "everything in scope".
        if keys.is_empty() {
            return Ok(stored);
        }

        Ok(stored
            .into_iter()
            .filter(|attribute| keys.contains(&attribute.key))
            .collect())
    }
}

/// Placeholder-template engine: substitutes `${msg_type}`, `${originator}`,
/// `${payload}`, and `${metadata.KEY}` into the configured script text.
///
/// An unknown placeholder is a runtime evaluation error, which makes this
/// engine handy for exercising the failure relay path in demos.
pub struct TemplateScriptEngine {
    script: String,
}

impl TemplateScriptEngine {
    fn render(&self, msg: &Msg) -> Result<String, EvaluationError> {
        let mut output = String::with_capacity(self.script.len());
        let mut rest = self.script.as_str();

        while let Some(start) = rest.find("${") {
            output.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find('}').ok_or_else(|| {
                EvaluationError::Script("unterminated placeholder".to_string())
            })?;
            let token = &after[..end];

            match token {
                "msg_type" => output.push_str(&msg.msg_type),
                "originator" => output.push_str(&msg.originator.to_string()),
                "payload" => output.push_str(&msg.payload.to_string()),
                _ => {
                    if let Some(key) = token.strip_prefix("metadata.") {
                        output.push_str(msg.metadata.get(key).unwrap_or(""));
                    } else {
                        return Err(EvaluationError::Script(format!(
                            "unknown placeholder '${{{}}}'",
                            token
                        )));
                    }
                }
            }

            rest = &after[end + 1..];
        }

        output.push_str(rest);
        Ok(output)
    }
}

#[async_trait]
impl ScriptEngine for TemplateScriptEngine {
    async fn execute_to_string(&self, msg: &Msg) -> Result<String, EvaluationError> {
        self.render(msg)
    }
}

/// Factory producing [`TemplateScriptEngine`] instances.
#[derive(Debug, Default)]
pub struct TemplateScriptEngineFactory;

impl ScriptEngineFactory for TemplateScriptEngineFactory {
    fn create_engine(&self, script: &str) -> Result<Box<dyn ScriptEngine>, ConfigurationError> {
        if script.trim().is_empty() {
            return Err(ConfigurationError::ScriptRejected {
                reason: "template is blank".to_string(),
            });
        }
        Ok(Box::new(TemplateScriptEngine {
            script: script.to_string(),
        }))
    }
}
