//! `dynamo-readonly-mcp serve`: run the MCP server.

use anyhow::{Context, Result};
use clap::Args;
use dynamo_adapter_aws::DynamoDbAdapter;
use dynamo_core::{ServerConfig, Transport};
use dynamo_mcp::{McpServer, ToolExecutor};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Arguments for `serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Configuration file path.
    #[arg(short, long, default_value = crate::DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Transport type (stdio or http). Overrides config file.
    #[arg(long)]
    pub transport: Option<Transport>,

    /// HTTP port (only for http transport). Overrides config file.
    #[arg(long)]
    pub port: Option<u16>,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(crate::DEFAULT_CONFIG),
            transport: None,
            port: None,
        }
    }
}

/// Load the file (if present) and the environment, then apply flag overrides.
pub fn load_config(args: &ServeArgs) -> Result<ServerConfig> {
    if !args.config.exists() {
        warn!(config = %args.config.display(), "Config file not found, using environment only");
    }

    let mut config = ServerConfig::load(Some(args.config.as_path()))
        .with_context(|| format!("Failed to load config file: {:?}", args.config))?;

    if let Some(transport) = args.transport {
        config.mcp.transport = transport;
    }
    if let Some(port) = args.port {
        config.mcp.port = port;
    }

    Ok(config)
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = load_config(&args)?;
    // Missing credentials or region stop the process before anything is served.
    config.validate().context("Invalid configuration")?;

    let adapter = DynamoDbAdapter::connect(&config.aws)
        .await
        .context("Failed to create DynamoDB client")?;

    info!(
        region = config.aws.region.as_deref().unwrap_or_default(),
        transport = ?config.mcp.transport,
        "Starting DynamoDB MCP server"
    );
    if config.mcp.transport == Transport::Http {
        info!(address = %config.mcp.bind_address(), "HTTP transport selected");
    }

    let executor = ToolExecutor::new(Arc::new(adapter)).with_limits(config.limits.clone());
    let server = McpServer::new(config.mcp, executor);

    server.run().await.context("MCP server failed")?;
    info!("MCP server stopped");
    Ok(())
}
