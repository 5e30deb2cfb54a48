use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::serve::ServeArgs;

/// Default configuration file, looked up in the working directory.
const DEFAULT_CONFIG: &str = "dynamo-mcp.yaml";

#[derive(Parser, Debug)]
#[command(
    name = "dynamo-readonly-mcp",
    version,
    about = "Read-only DynamoDB MCP server"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the MCP server (the default when no subcommand is given).
    Serve(ServeArgs),

    /// Inspect the tools the server exposes.
    Tools {
        #[command(subcommand)]
        cmd: ToolsCommand,
    },

    /// Validate configuration and probe DynamoDB connectivity.
    Check {
        /// Configuration file path.
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum ToolsCommand {
    /// List every tool.
    List {
        /// Print each tool's input schema.
        #[arg(long, default_value_t = false)]
        verbose: bool,
    },

    /// Show one tool's description, schema and annotations.
    Describe {
        /// Tool name, e.g. `scan-table`.
        name: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        None => commands::serve::execute(ServeArgs::default()).await?,
        Some(Command::Serve(args)) => commands::serve::execute(args).await?,
        Some(Command::Tools { cmd }) => match cmd {
            ToolsCommand::List { verbose } => commands::tools::list(verbose)?,
            ToolsCommand::Describe { name } => commands::tools::describe(&name)?,
        },
        Some(Command::Check { config }) => commands::check::execute(&config).await?,
    }

    Ok(())
}
