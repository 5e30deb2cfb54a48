//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to [`StoreError`], keeping the service message verbatim.

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use dynamo_runtime::StoreError;
use std::fmt::Debug;

/// Map any operation's SDK error to a `StoreError`.
pub fn map_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug,
{
    match &err {
        SdkError::ServiceError(service) => {
            let inner = service.err();
            let message = match inner.message() {
                Some(m) => m.to_string(),
                None => format!("{} failed: {}", operation, DisplayErrorContext(inner)),
            };
            classify(inner.code().map(str::to_string), message)
        }
        _ => StoreError::Dispatch(format!("{} failed: {}", operation, DisplayErrorContext(&err))),
    }
}

/// Pick a `StoreError` variant from the service error code.
pub fn classify(code: Option<String>, message: String) -> StoreError {
    match code.as_deref() {
        Some("ResourceNotFoundException") => StoreError::ResourceNotFound(message),
        Some(
            "ProvisionedThroughputExceededException"
            | "RequestLimitExceeded"
            | "ThrottlingException",
        ) => StoreError::Throttled(message),
        _ => StoreError::Service { code, message },
    }
}
