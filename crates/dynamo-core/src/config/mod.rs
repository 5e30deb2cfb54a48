//! Configuration types for the DynamoDB MCP server.
//!
//! Configuration comes from three layers, later layers winning:
//!
//! 1. An optional YAML file (`dynamo-mcp.yaml` by default)
//! 2. Environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_REGION`, ...)
//! 3. Command line flags (applied by the binary)
//!
//! The three AWS settings are required. [`ServerConfig::validate`] is called once
//! at startup and a missing setting aborts the process.

pub mod aws;
pub mod limits;
pub mod mcp;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use aws::AwsConfig;
pub use limits::LimitsConfig;
pub use mcp::{McpConfig, Transport};

/// Complete server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// AWS connection settings.
    #[serde(default)]
    pub aws: AwsConfig,

    /// MCP transport settings.
    #[serde(default)]
    pub mcp: McpConfig,

    /// Query limits and deadlines.
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Required environment variable {0} is not set")]
    MissingSetting(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

impl ServerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load the file if it exists (defaults otherwise), then apply the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(p)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay values from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.aws.apply_env(&lookup);
    }

    /// Validate required settings. Called once at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aws.validate()?;
        self.limits.validate()
    }
}
