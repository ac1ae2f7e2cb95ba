// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;

use serde_json::json;
use tracing_subscriber::EnvFilter;

use the_switchyard::config::load_and_validate_config;
use the_switchyard::context::{MsgContext, ServiceCatalog};
use the_switchyard::entities::{EntityKind, EntityRef};
use the_switchyard::msg::Msg;
use the_switchyard::nodes::NodeFactory;
use the_switchyard::relay::Relayed;
use the_switchyard::services::memory::{
    InMemoryAttributeService, InMemoryEntityService, TemplateScriptEngineFactory,
};
use the_switchyard::services::AttributeScope;

/// Build the demo world: a device owned by a group owned by a tenant, with a
/// few attributes scattered across the hierarchy.
fn demo_services() -> (Arc<ServiceCatalog>, EntityRef, EntityRef) {
    let device = EntityRef::random(EntityKind::Device);
    let orphan = EntityRef::random(EntityKind::Device);
    let group = EntityRef::random(EntityKind::Group);
    let tenant = EntityRef::random(EntityKind::Tenant);

    let entities = InMemoryEntityService::new()
        .with_owner(device, group)
        .with_owner(group, tenant);

    let attributes = InMemoryAttributeService::new()
        .with_attribute(tenant, AttributeScope::Server, "alarm_threshold", "75")
        .with_attribute(tenant, AttributeScope::Server, "region", "eu-west")
        .with_attribute(device, AttributeScope::Shared, "label", "rooftop sensor");

    let services = Arc::new(ServiceCatalog::new(
        Arc::new(TemplateScriptEngineFactory),
        Arc::new(entities),
        Arc::new(attributes),
    ));

    (services, device, orphan)
}

async fn run_chain(
    config_file: &str,
    services: Arc<ServiceCatalog>,
    mut msg: Msg,
) -> anyhow::Result<()> {
    let config = load_and_validate_config(config_file)?;
    let mut nodes = NodeFactory::build_nodes(&config, &services)?;

    println!("📋 Chain: {} ({} node(s))", config_file, nodes.len());
    println!("📨 Msg:   {} from {}", msg.msg_type, msg.originator);

    for (node_id, node) in &nodes {
        let (ctx, rx) = MsgContext::new(node_id.clone(), services.clone());
        node.on_msg(ctx, msg).await;

        match rx.await? {
            Relayed::Success(next) => {
                println!("  ✅ {} → success ({} metadata key(s))", node_id, next.metadata.len());
                msg = next;
            }
            Relayed::Failure(failed, cause) => {
                println!("  ❌ {} → failure: {}", node_id, cause);
                msg = failed;
                break;
            }
            Relayed::Next(next, link) => {
                println!("  ↪️  {} → '{}'", node_id, link);
                msg = next;
            }
        }
    }

    if !msg.metadata.is_empty() {
        println!("  📝 Final metadata:");
        for (key, value) in msg.metadata.iter() {
            println!("     • {}: {}", key, value);
        }
    }

    for (_, node) in nodes.iter_mut() {
        node.destroy();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <chain.yaml>", args[0]);
        eprintln!("Example: {} configs/tenant-enrichment.yaml", args[0]);
        std::process::exit(1);
    }

    let (services, device, orphan) = demo_services();

    println!("🚦 Switchyard Demo");
    println!("══════════════════");

    // A device with a full ownership chain: enrichment succeeds.
    let msg = Msg::new("POST_TELEMETRY", device, json!({ "temperature": 80 }));
    run_chain(&args[1], services.clone(), msg).await?;

    println!();

    // An unassigned device: enrichment relays to the failure outcome.
    let msg = Msg::new("POST_TELEMETRY", orphan, json!({ "temperature": 12 }));
    run_chain(&args[1], services, msg).await?;

    Ok(())
}
