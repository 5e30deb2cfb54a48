//! AWS SDK client setup.

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Credentials;
use dynamo_core::{AwsConfig, ConfigError};

const CREDENTIALS_PROVIDER: &str = "dynamo-readonly-mcp";

/// Build a DynamoDB client from validated settings.
///
/// Credentials are static for the process lifetime: the access key, secret
/// and optional session token are read once at startup.
pub async fn create_client(config: &AwsConfig) -> Result<Client, ConfigError> {
    config.validate()?;

    let credentials = Credentials::new(
        config.access_key_id.clone().unwrap_or_default(),
        config.secret_access_key.clone().unwrap_or_default(),
        config.session_token.clone(),
        None,
        CREDENTIALS_PROVIDER,
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region().to_string()))
        .credentials_provider(credentials);

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;

    tracing::info!(
        target = %config.target_display(),
        access_key_id = if config.access_key_id.is_some() { "set" } else { "not set" },
        secret_access_key = if config.secret_access_key.is_some() { "set" } else { "not set" },
        "DynamoDB client configured"
    );

    Ok(Client::new(&sdk_config))
}
