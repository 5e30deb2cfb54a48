//! `dynamo-readonly-mcp check`: validate configuration and probe the store.
//!
//! Runs the same startup validation as `serve`, then lists tables once so
//! credential, region and endpoint problems surface before a client connects.

use anyhow::{Context, Result};
use dynamo_adapter_aws::DynamoDbAdapter;
use dynamo_core::ServerConfig;
use dynamo_runtime::TableStore;
use std::path::Path;

pub async fn execute(config_path: &Path) -> Result<()> {
    let config = ServerConfig::load(Some(config_path))
        .with_context(|| format!("Failed to load config file: {:?}", config_path))?;

    println!("\n🔍 Checking configuration...");
    config.validate().context("Invalid configuration")?;
    println!("   ✓ AWS credentials and region set");
    if let Some(endpoint) = &config.aws.endpoint_url {
        println!("   • Endpoint override: {}", endpoint);
    }
    match config.limits.max_pages {
        Some(max) => println!("   • Paginated queries capped at {} pages", max),
        None => println!("   • Paginated queries are unbounded"),
    }

    println!("\n🔌 Connecting to DynamoDB...");
    let adapter = DynamoDbAdapter::connect(&config.aws)
        .await
        .context("Failed to create DynamoDB client")?;
    let tables = adapter
        .list_tables()
        .await
        .context("Failed to list tables")?;

    println!("   ✓ {} table(s) visible", tables.len());
    for table in &tables {
        println!("   • {}", table);
    }

    println!();
    Ok(())
}
