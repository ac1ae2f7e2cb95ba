// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::config::{ChainConfig, NodeSpec};
use crate::context::ServiceCatalog;
use crate::errors::ConfigurationError;
use crate::nodes::{GetAttributesNode, ScriptLogNode};
use crate::traits::RuleNode;

/// The closed set of node kinds this crate ships.
///
/// New kinds are added by implementing [`RuleNode`] and extending this enum
/// plus the factory match, selected by configuration at assembly time rather than
/// by subclassing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    ScriptLog,
    GetAttributes,
}

/// Factory for creating rule node instances from configuration.
pub struct NodeFactory;

impl NodeFactory {
    /// Create an uninitialized node of the configured kind.
    pub fn create_node(kind: NodeKind) -> Box<dyn RuleNode> {
        match kind {
            NodeKind::ScriptLog => Box::new(ScriptLogNode::new()),
            NodeKind::GetAttributes => Box::new(GetAttributesNode::new()),
        }
    }

    /// Create and initialize one node from its spec.
    pub fn build_node(
        spec: &NodeSpec,
        services: &ServiceCatalog,
    ) -> Result<Box<dyn RuleNode>, ConfigurationError> {
        let mut node = Self::create_node(spec.kind);
        node.init(services, &spec.config)?;
        Ok(node)
    }

    /// Create and initialize every node in the chain, in configured order.
    ///
    /// Chain assembly is the one place allowed to fail loudly: the first
    /// configuration error aborts the build before any msg is in flight.
    pub fn build_nodes(
        config: &ChainConfig,
        services: &ServiceCatalog,
    ) -> Result<Vec<(String, Box<dyn RuleNode>)>, ConfigurationError> {
        config
            .nodes
            .iter()
            .map(|spec| Ok((spec.id.clone(), Self::build_node(spec, services)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::{
        InMemoryAttributeService, InMemoryEntityService, TemplateScriptEngineFactory,
    };
    use serde_json::json;
    use std::sync::Arc;

    fn services() -> ServiceCatalog {
        ServiceCatalog::new(
            Arc::new(TemplateScriptEngineFactory),
            Arc::new(InMemoryEntityService::new()),
            Arc::new(InMemoryAttributeService::new()),
        )
    }

    #[test]
    fn factory_builds_both_node_kinds() {
        assert_eq!(NodeFactory::create_node(NodeKind::ScriptLog).name(), "script_log");
        assert_eq!(
            NodeFactory::create_node(NodeKind::GetAttributes).name(),
            "get_attributes"
        );
    }

    #[test]
    fn build_nodes_inits_every_spec_in_order() {
        let config = ChainConfig {
            nodes: vec![
                NodeSpec {
                    id: "enrich".into(),
                    kind: NodeKind::GetAttributes,
                    config: json!({ "scope": "originator" }),
                },
                NodeSpec {
                    id: "log".into(),
                    kind: NodeKind::ScriptLog,
                    config: json!({ "script": "${msg_type}" }),
                },
            ],
        };

        let nodes = NodeFactory::build_nodes(&config, &services()).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].0, "enrich");
        assert_eq!(nodes[1].1.name(), "script_log");
    }

    #[test]
    fn first_bad_spec_aborts_assembly() {
        let config = ChainConfig {
            nodes: vec![NodeSpec {
                id: "log".into(),
                kind: NodeKind::ScriptLog,
                config: json!({}),
            }],
        };

        let Err(err) = NodeFactory::build_nodes(&config, &services()) else {
            panic!("assembly accepted a node spec with no script");
        };
        assert!(matches!(err, ConfigurationError::Decode(_)));
    }
}
