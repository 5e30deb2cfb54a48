//! Tool registry for MCP tools.
//!
//! Holds each tool's definition together with a compiled validator for its
//! input schema. Arguments are checked here before any request is built.

use crate::error::ValidationError;
use crate::protocol::ToolDefinition;
use crate::tool_catalog::catalog;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
struct RegisteredTool {
    definition: ToolDefinition,
    validator: Option<Arc<jsonschema::Validator>>,
}

/// Registry of available MCP tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the full read-only catalog.
    pub fn with_catalog() -> Self {
        let mut registry = Self::new();
        for tool in catalog() {
            registry.register(tool);
        }
        registry
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: ToolDefinition) {
        let validator = match jsonschema::validator_for(&tool.input_schema) {
            Ok(v) => Some(Arc::new(v)),
            Err(e) => {
                tracing::warn!(
                    tool = %tool.name,
                    error = %e,
                    "Tool input schema does not compile; arguments will not be checked"
                );
                None
            }
        };

        if !self.tools.contains_key(&tool.name) {
            self.order.push(tool.name.clone());
        }
        self.tools.insert(
            tool.name.clone(),
            RegisteredTool {
                definition: tool,
                validator,
            },
        );
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name).map(|t| &t.definition)
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tools in registration order.
    pub fn list(&self) -> Vec<&ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get tool names.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Check `arguments` against the tool's input schema, collecting every
    /// violation.
    pub fn validate_arguments(&self, name: &str, arguments: &Value) -> Result<(), ValidationError> {
        let Some(validator) = self.tools.get(name).and_then(|t| t.validator.as_ref()) else {
            return Ok(());
        };

        let errors: Vec<String> = validator
            .iter_errors(arguments)
            .map(|error| {
                let path = error.instance_path().to_string();
                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{}: {}", path, error)
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Schema {
                tool: name.to_string(),
                errors,
            })
        }
    }
}
