//! Store errors.

use std::time::Duration;
use thiserror::Error;

/// Errors raised while talking to the store.
///
/// Backend-reported errors keep the backend's message verbatim in their
/// `Display` output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Table or index does not exist.
    #[error("{0}")]
    ResourceNotFound(String),

    /// Provisioned throughput, request limit or throttling.
    #[error("{0}")]
    Throttled(String),

    /// Any other error returned by the service.
    #[error("{message}")]
    Service {
        code: Option<String>,
        message: String,
    },

    /// The request never got a service response (network, credentials, ...).
    #[error("request dispatch failed: {0}")]
    Dispatch(String),

    /// A value could not be converted to or from the store's format.
    #[error("attribute conversion failed: {0}")]
    Conversion(String),

    /// The configured per-request deadline expired.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The configured page cap was reached with pages still remaining.
    #[error("pagination stopped after {0} pages; narrow the key condition or raise limits.max_pages")]
    PageLimitExceeded(u32),

    /// A page handed back the cursor it was requested with.
    #[error("pagination stalled on page {page}: the store returned the same cursor again")]
    StalledCursor { page: u32 },
}

impl StoreError {
    /// Backend error code, when one was reported.
    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::ResourceNotFound(_) => Some("ResourceNotFoundException"),
            StoreError::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
