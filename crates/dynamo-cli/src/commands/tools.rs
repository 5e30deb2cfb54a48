//! Tools introspection commands.
//!
//! `tools list` - List every tool the server exposes (offline).
//! `tools describe` - Show the schema and annotations of one tool.

use anyhow::Result;
use dynamo_mcp::{ToolDefinition, ToolRegistry};

/// Print every tool in registration order.
pub fn list(verbose: bool) -> Result<()> {
    let registry = ToolRegistry::with_catalog();
    let tools = registry.list();

    println!("\n🔧 Available Tools ({}):", tools.len());

    for tool in &tools {
        println!("   • {} ({})", tool.name, badges(tool).join(", "));

        if let Some(desc) = &tool.description {
            println!("     {}", desc);
        }

        if verbose {
            println!(
                "     Schema: {}",
                serde_json::to_string_pretty(&tool.input_schema)?
            );
        }
    }

    println!();
    Ok(())
}

/// Show detailed schema for a specific tool.
pub fn describe(tool_name: &str) -> Result<()> {
    let registry = ToolRegistry::with_catalog();
    let tool = registry
        .get(tool_name)
        .ok_or_else(|| anyhow::anyhow!("Tool '{}' not found", tool_name))?;

    println!("\nTool: {}", tool.name);

    if let Some(desc) = &tool.description {
        println!("\nDescription: {}", desc);
    }

    println!("\nInput Schema:");
    println!("{}", serde_json::to_string_pretty(&tool.input_schema)?);

    if let Some(annotations) = &tool.annotations {
        println!("\nAnnotations:");
        if let Some(title) = &annotations.title {
            println!("  • title: {}", title);
        }
        if let Some(read_only) = annotations.read_only_hint {
            println!("  • readOnlyHint: {}", read_only);
        }
        if let Some(destructive) = annotations.destructive_hint {
            println!("  • destructiveHint: {}", destructive);
        }
        if let Some(idempotent) = annotations.idempotent_hint {
            println!("  • idempotentHint: {}", idempotent);
        }
    }

    println!();
    Ok(())
}

fn badges(tool: &ToolDefinition) -> Vec<&'static str> {
    let annotations = tool.annotations.as_ref();
    let mut badges = Vec::new();
    if annotations.is_some_and(|a| a.read_only_hint == Some(true)) {
        badges.push("read");
    } else {
        badges.push("write");
    }
    if annotations.is_some_and(|a| a.idempotent_hint == Some(true)) {
        badges.push("idempotent");
    }
    badges
}
