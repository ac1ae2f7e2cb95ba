// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Attribute-enrichment node: resolve a target entity related to the msg's
//! originator, fetch its attributes, and merge them into the msg metadata.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::{MsgContext, ServiceCatalog};
use crate::entities::TargetScope;
use crate::errors::{ConfigurationError, NodeFailure};
use crate::msg::Msg;
use crate::nodes::resolver::resolve_target;
use crate::observability::messages::enrichment::{
    AttributeFetchFailed, AttributesMerged, TargetResolutionFailed, TargetResolved,
};
use crate::observability::messages::node::{NodeDestroyed, NodeInitialized};
use crate::observability::messages::StructuredLog;
use crate::services::AttributeScope;
use crate::traits::RuleNode;

/// Configuration for the attribute-enrichment node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAttributesConfig {
    /// Which entity to enrich from: the originator or one of its ancestors.
    pub scope: TargetScope,
    /// Server-side or shared attributes.
    #[serde(default)]
    pub attribute_scope: AttributeScope,
    /// Attribute keys to fetch. Empty means "all available", never "none".
    #[serde(default)]
    pub keys: Vec<String>,
    /// Prefix prepended to each attribute name before metadata insertion.
    #[serde(default)]
    pub prefix: String,
}

/// Enriches msgs with externally-fetched entity attributes.
///
/// The three-step pipeline per msg (resolve target, fetch attributes, merge)
/// is strictly sequential; each step starts only after the previous one's
/// continuation fired. Resolution "not found" and collaborator faults both
/// relay to the failure outcome but stay distinguishable in the cause.
#[derive(Default)]
pub struct GetAttributesNode {
    config: Option<GetAttributesConfig>,
}

impl GetAttributesNode {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RuleNode for GetAttributesNode {
    fn init(
        &mut self,
        _services: &ServiceCatalog,
        raw_config: &serde_json::Value,
    ) -> Result<(), ConfigurationError> {
        let config: GetAttributesConfig = serde_json::from_value(raw_config.clone())?;

        NodeInitialized {
            node_id: self.name(),
            kind: "enrichment",
        }
        .log();

        self.config = Some(config);
        Ok(())
    }

    async fn on_msg(&self, ctx: MsgContext, mut msg: Msg) {
        let Some(config) = self.config.as_ref() else {
            let cause = NodeFailure::Unexpected(
                "get_attributes node used before init or after destroy".to_string(),
            );
            ctx.tell_failure(msg, cause);
            return;
        };

        let entities = ctx.services().entities.clone();
        let target = match resolve_target(entities.as_ref(), config.scope, &msg.originator).await {
            Ok(target) => target,
            Err(cause) => {
                TargetResolutionFailed {
                    node_id: ctx.node_id(),
                    scope: config.scope,
                    cause: &cause,
                }
                .log();
                ctx.tell_failure(msg, cause);
                return;
            }
        };

        TargetResolved {
            node_id: ctx.node_id(),
            scope: config.scope,
            target,
        }
        .log();

        let fetched = ctx
            .services()
            .attributes
            .find_attributes(&target, config.attribute_scope, &config.keys)
            .await;

        let attributes = match fetched {
            Ok(attributes) => attributes,
            Err(fault) => {
                let cause = NodeFailure::Collaborator(fault);
                AttributeFetchFailed {
                    node_id: ctx.node_id(),
                    target,
                    cause: &cause,
                }
                .log();
                ctx.tell_failure(msg, cause);
                return;
            }
        };

        // Zero matching attributes is still success: metadata unchanged.
        let merged = attributes.len();
        for attribute in attributes {
            msg.metadata
                .insert(format!("{}{}", config.prefix, attribute.key), attribute.value);
        }

        AttributesMerged {
            node_id: ctx.node_id(),
            target,
            merged,
        }
        .log();
        ctx.tell_success(msg);
    }

    fn destroy(&mut self) {
        // Idempotent: only the call that actually releases the config logs.
        if self.config.take().is_some() {
            NodeDestroyed {
                node_id: self.name(),
            }
            .log();
        }
    }

    fn name(&self) -> &'static str {
        "get_attributes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityKind, EntityRef};
    use crate::errors::CollaboratorFault;
    use crate::relay::Relayed;
    use crate::services::memory::{
        InMemoryAttributeService, InMemoryEntityService, TemplateScriptEngineFactory,
    };
    use crate::services::mock::{FailingAttributeService, FailingEntityService};
    use crate::services::{AttributeService, EntityService, RecordingDiagnostics};
    use serde_json::json;
    use std::sync::Arc;

    fn catalog(
        entities: Arc<dyn EntityService>,
        attributes: Arc<dyn AttributeService>,
    ) -> Arc<ServiceCatalog> {
        Arc::new(
            ServiceCatalog::new(Arc::new(TemplateScriptEngineFactory), entities, attributes)
                .with_diagnostics(Arc::new(RecordingDiagnostics::new())),
        )
    }

    fn init_node(services: &ServiceCatalog, config: serde_json::Value) -> GetAttributesNode {
        let mut node = GetAttributesNode::new();
        node.init(services, &config).unwrap();
        node
    }

    #[tokio::test]
    async fn self_scope_merges_attributes_under_the_prefix() {
        let device = EntityRef::random(EntityKind::Device);
        let attributes = InMemoryAttributeService::new().with_attribute(
            device,
            AttributeScope::Server,
            "temp",
            "20",
        );
        let services = catalog(
            Arc::new(InMemoryEntityService::new()),
            Arc::new(attributes),
        );

        let node = init_node(
            &services,
            json!({ "scope": "originator", "keys": ["temp", "no_such_key"], "prefix": "dev_" }),
        );
        let msg = Msg::new("POST_TELEMETRY", device, json!({}));
        let (ctx, rx) = MsgContext::new("enrich_1", services);
        node.on_msg(ctx, msg).await;

        match rx.await.unwrap() {
            Relayed::Success(enriched) => {
                assert_eq!(enriched.metadata.get("dev_temp"), Some("20"));
                // The requested-but-absent key is silently omitted.
                assert_eq!(enriched.metadata.get("dev_no_such_key"), None);
                assert_eq!(enriched.metadata.len(), 1);
            }
            other => panic!("expected success relay, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn zero_matching_attributes_is_success_with_metadata_unchanged() {
        let device = EntityRef::random(EntityKind::Device);
        let services = catalog(
            Arc::new(InMemoryEntityService::new()),
            Arc::new(InMemoryAttributeService::new()),
        );

        let node = init_node(&services, json!({ "scope": "originator" }));
        let msg = Msg::new("POST_TELEMETRY", device, json!({}));
        let (ctx, rx) = MsgContext::new("enrich_1", services);
        node.on_msg(ctx, msg).await;

        match rx.await.unwrap() {
            Relayed::Success(enriched) => assert!(enriched.metadata.is_empty()),
            other => panic!("expected success relay, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn tenant_scope_enriches_through_two_owner_hops() {
        let device = EntityRef::random(EntityKind::Device);
        let group = EntityRef::random(EntityKind::Group);
        let tenant = EntityRef::random(EntityKind::Tenant);
        let entities = InMemoryEntityService::new()
            .with_owner(device, group)
            .with_owner(group, tenant);
        let attributes = InMemoryAttributeService::new().with_attribute(
            tenant,
            AttributeScope::Server,
            "alarm_threshold",
            "75",
        );
        let services = catalog(Arc::new(entities), Arc::new(attributes));

        let node = init_node(
            &services,
            json!({ "scope": "owning_tenant", "prefix": "tenant_" }),
        );
        let msg = Msg::new("POST_TELEMETRY", device, json!({}));
        let (ctx, rx) = MsgContext::new("enrich_1", services);
        node.on_msg(ctx, msg).await;

        match rx.await.unwrap() {
            Relayed::Success(enriched) => {
                assert_eq!(enriched.metadata.get("tenant_alarm_threshold"), Some("75"));
            }
            other => panic!("expected success relay, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unresolvable_ancestor_relays_entity_not_found() {
        let device = EntityRef::random(EntityKind::Device);
        let services = catalog(
            Arc::new(InMemoryEntityService::new()),
            Arc::new(InMemoryAttributeService::new()),
        );

        let node = init_node(&services, json!({ "scope": "owning_group" }));
        let msg = Msg::new("POST_TELEMETRY", device, json!({}));
        let (ctx, rx) = MsgContext::new("enrich_1", services);
        node.on_msg(ctx, msg).await;

        match rx.await.unwrap() {
            Relayed::Failure(_, NodeFailure::EntityNotFound { scope, originator }) => {
                assert_eq!(scope, TargetScope::OwningGroup);
                assert_eq!(originator, device);
            }
            other => panic!("expected not-found failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn lookup_fault_relays_collaborator_failure_not_not_found() {
        let device = EntityRef::random(EntityKind::Device);
        let services = catalog(
            Arc::new(FailingEntityService::unavailable("connection refused")),
            Arc::new(InMemoryAttributeService::new()),
        );

        let node = init_node(&services, json!({ "scope": "owning_tenant" }));
        let msg = Msg::new("POST_TELEMETRY", device, json!({}));
        let (ctx, rx) = MsgContext::new("enrich_1", services);
        node.on_msg(ctx, msg).await;

        match rx.await.unwrap() {
            Relayed::Failure(_, NodeFailure::Collaborator(CollaboratorFault::Unavailable { .. })) => {}
            other => panic!("expected collaborator failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_stage_fault_relays_collaborator_failure() {
        let device = EntityRef::random(EntityKind::Device);
        let services = catalog(
            Arc::new(InMemoryEntityService::new()),
            Arc::new(FailingAttributeService::unavailable("store offline")),
        );

        let node = init_node(&services, json!({ "scope": "originator" }));
        let msg = Msg::new("POST_TELEMETRY", device, json!({}));
        let (ctx, rx) = MsgContext::new("enrich_1", services);
        node.on_msg(ctx, msg).await;

        match rx.await.unwrap() {
            Relayed::Failure(_, NodeFailure::Collaborator(_)) => {}
            other => panic!("expected collaborator failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_scope_value_fails_init() {
        let services = catalog(
            Arc::new(InMemoryEntityService::new()),
            Arc::new(InMemoryAttributeService::new()),
        );

        let mut node = GetAttributesNode::new();
        let err = node
            .init(&services, &json!({ "scope": "owning_galaxy" }))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::Decode(_)));
    }

    #[tokio::test]
    async fn shared_scope_reads_the_shared_side_of_the_store() {
        let device = EntityRef::random(EntityKind::Device);
        let attributes = InMemoryAttributeService::new()
            .with_attribute(device, AttributeScope::Server, "temp", "20")
            .with_attribute(device, AttributeScope::Shared, "label", "roof");
        let services = catalog(
            Arc::new(InMemoryEntityService::new()),
            Arc::new(attributes),
        );

        let node = init_node(
            &services,
            json!({ "scope": "originator", "attribute_scope": "shared" }),
        );
        let msg = Msg::new("POST_TELEMETRY", device, json!({}));
        let (ctx, rx) = MsgContext::new("enrich_1", services);
        node.on_msg(ctx, msg).await;

        match rx.await.unwrap() {
            Relayed::Success(enriched) => {
                assert_eq!(enriched.metadata.get("label"), Some("roof"));
                assert_eq!(enriched.metadata.get("temp"), None);
            }
            other => panic!("expected success relay, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn destroy_is_idempotent_and_later_msgs_relay_failure() {
        let device = EntityRef::random(EntityKind::Device);
        let services = catalog(
            Arc::new(InMemoryEntityService::new()),
            Arc::new(InMemoryAttributeService::new()),
        );

        let mut node = init_node(&services, json!({ "scope": "originator" }));
        node.destroy();
        node.destroy();

        let msg = Msg::new("POST_TELEMETRY", device, json!({}));
        let (ctx, rx) = MsgContext::new("enrich_1", services);
        node.on_msg(ctx, msg).await;

        match rx.await.unwrap() {
            Relayed::Failure(_, NodeFailure::Unexpected(_)) => {}
            other => panic!("expected unexpected-failure relay, got {:?}", other),
        }
    }
}
