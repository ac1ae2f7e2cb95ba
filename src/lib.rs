// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config; // chain-node configuration
pub mod context; // per-invocation execution context + service catalog
pub mod entities; // entity references and scopes
pub mod errors; // error handling
pub mod msg; // the event envelope
pub mod nodes; // node implementations + factory
pub mod observability;
pub mod relay; // single-fire relay protocol
pub mod services; // collaborator service boundaries
pub mod traits; // the RuleNode contract
