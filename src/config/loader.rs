// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::ConfigurationError;
use crate::nodes::NodeKind;

/// The chain-node portion of a rule chain definition.
///
/// Only the nodes themselves live here: how they are wired into a graph and
/// scheduled is the chain scheduler's concern, not this crate's. Loaded from
/// a YAML file:
///
/// ```yaml
/// nodes:
///   - id: tenant_attributes
///     kind: get_attributes
///     config:
///       scope: owning_tenant
///       keys: [alarm_threshold]
///       prefix: "tenant_"
///   - id: log_threshold
///     kind: script_log
///     config:
///       script: "threshold=${metadata.tenant_alarm_threshold}"
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    pub nodes: Vec<NodeSpec>,
}

/// One configured node: identity, kind, and the kind-specific raw config.
///
/// The raw config stays an untyped JSON value here; each node's `init`
/// decodes it into its typed form and owns the validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub config: serde_json::Value,
}

/// Load a chain configuration from a YAML file.
pub fn load_config(path: impl AsRef<Path>) -> Result<ChainConfig, ConfigurationError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ChainConfig = serde_yaml::from_str(&contents)?;
    Ok(config)
}

/// Structural validation that does not need the collaborator services:
/// every node id present and unique.
pub fn validate_config(config: &ChainConfig) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::new();
    for (position, spec) in config.nodes.iter().enumerate() {
        if spec.id.trim().is_empty() {
            return Err(ConfigurationError::EmptyNodeId { position });
        }
        if !seen.insert(spec.id.as_str()) {
            return Err(ConfigurationError::DuplicateNodeId {
                node_id: spec.id.clone(),
            });
        }
    }
    Ok(())
}

/// Load and structurally validate in one step.
pub fn load_and_validate_config(
    path: impl AsRef<Path>,
) -> Result<ChainConfig, ConfigurationError> {
    let config = load_config(path)?;
    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
nodes:
  - id: tenant_attributes
    kind: get_attributes
    config:
      scope: owning_tenant
      keys: [alarm_threshold]
      prefix: "tenant_"
  - id: log_threshold
    kind: script_log
    config:
      script: "threshold=${metadata.tenant_alarm_threshold}"
"#;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_valid_chain_file() {
        let file = write_config(SAMPLE);
        let config = load_and_validate_config(file.path()).unwrap();

        assert_eq!(config.nodes.len(), 2);
        assert_eq!(config.nodes[0].id, "tenant_attributes");
        assert_eq!(config.nodes[0].kind, NodeKind::GetAttributes);
        assert_eq!(config.nodes[1].kind, NodeKind::ScriptLog);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_config("/no/such/chain.yaml").unwrap_err();
        match err {
            ConfigurationError::Io { path, .. } => {
                assert_eq!(path, std::path::PathBuf::from("/no/such/chain.yaml"));
            }
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_node_kind_fails_to_parse() {
        let file = write_config("nodes:\n  - id: x\n    kind: teleport\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse(_)));
    }

    #[test]
    fn duplicate_node_ids_are_rejected() {
        let file = write_config(
            "nodes:\n  - id: a\n    kind: script_log\n  - id: a\n    kind: script_log\n",
        );
        let err = load_and_validate_config(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::DuplicateNodeId { node_id } if node_id == "a"
        ));
    }

    #[test]
    fn empty_node_id_is_rejected_with_its_position() {
        let file = write_config("nodes:\n  - id: \"\"\n    kind: script_log\n");
        let err = load_and_validate_config(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::EmptyNodeId { position: 0 }
        ));
    }

    #[test]
    fn omitted_config_defaults_to_null() {
        let file = write_config("nodes:\n  - id: a\n    kind: script_log\n");
        let config = load_config(file.path()).unwrap();
        assert!(config.nodes[0].config.is_null());
    }
}
