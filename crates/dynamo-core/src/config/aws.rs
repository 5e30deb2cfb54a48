//! AWS connection settings.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ACCESS_KEY_ID_ENV: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN_ENV: &str = "AWS_SESSION_TOKEN";
pub const REGION_ENV: &str = "AWS_REGION";
pub const ENDPOINT_URL_ENV: &str = "AWS_ENDPOINT_URL";

/// Credentials, region and endpoint for the DynamoDB client.
///
/// Secrets are never serialized and are redacted from `Debug` output.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Access key id (`AWS_ACCESS_KEY_ID`).
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Secret access key (`AWS_SECRET_ACCESS_KEY`).
    #[serde(default, skip_serializing)]
    pub secret_access_key: Option<String>,

    /// Session token for temporary credentials (`AWS_SESSION_TOKEN`).
    #[serde(default, skip_serializing)]
    pub session_token: Option<String>,

    /// Region identifier (`AWS_REGION`).
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint, e.g. DynamoDB Local (`AWS_ENDPOINT_URL`).
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    /// Overlay non-empty environment values.
    pub fn apply_env<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = read(ACCESS_KEY_ID_ENV) {
            self.access_key_id = Some(v);
        }
        if let Some(v) = read(SECRET_ACCESS_KEY_ENV) {
            self.secret_access_key = Some(v);
        }
        if let Some(v) = read(SESSION_TOKEN_ENV) {
            self.session_token = Some(v);
        }
        if let Some(v) = read(REGION_ENV) {
            self.region = Some(v);
        }
        if let Some(v) = read(ENDPOINT_URL_ENV) {
            self.endpoint_url = Some(v);
        }
    }

    /// Check that the access key, secret key and region are all present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require(&self.access_key_id, ACCESS_KEY_ID_ENV)?;
        require(&self.secret_access_key, SECRET_ACCESS_KEY_ENV)?;
        require(&self.region, REGION_ENV)?;
        Ok(())
    }

    /// Region, or an empty string before validation.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or_default()
    }

    /// Display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region()),
        }
    }
}

fn require(value: &Option<String>, name: &'static str) -> Result<(), ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::MissingSetting(name)),
    }
}

fn set_or_not(value: &Option<String>) -> &'static str {
    if value.is_some() { "set" } else { "not set" }
}

impl fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsConfig")
            .field("access_key_id", &set_or_not(&self.access_key_id))
            .field("secret_access_key", &set_or_not(&self.secret_access_key))
            .field("session_token", &set_or_not(&self.session_token))
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}
