//! Diagnostic tracing of the request lifecycle.
//!
//! Every tool call emits events for each stage it passes through: request
//! built, response received, page drained, fault raised. Sinks observe only:
//! `record` must return quickly, must not panic and cannot influence the
//! operation being traced.

use serde::Serialize;
use serde_json::Value;

/// A lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum TraceEvent {
    /// A request descriptor was assembled.
    RequestBuilt {
        operation: &'static str,
        request: Value,
    },
    /// A single-call response arrived.
    ResponseReceived {
        operation: &'static str,
        items: usize,
    },
    /// One page of a paginated drain arrived.
    PageDrained {
        operation: &'static str,
        page: u32,
        items: usize,
        has_more: bool,
    },
    /// The operation failed.
    FaultRaised {
        operation: &'static str,
        message: String,
    },
}

impl TraceEvent {
    pub fn operation(&self) -> &'static str {
        match self {
            TraceEvent::RequestBuilt { operation, .. }
            | TraceEvent::ResponseReceived { operation, .. }
            | TraceEvent::PageDrained { operation, .. }
            | TraceEvent::FaultRaised { operation, .. } => operation,
        }
    }
}

/// Side channel receiving lifecycle events.
pub trait TraceSink: Send + Sync {
    fn record(&self, event: TraceEvent);
}

/// Emits each event through `tracing`.
///
/// Request payloads can contain key values, so they are logged at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&self, event: TraceEvent) {
        match event {
            TraceEvent::RequestBuilt { operation, request } => {
                tracing::debug!(operation, request = %request, "Request built");
            }
            TraceEvent::ResponseReceived { operation, items } => {
                tracing::debug!(operation, items, "Response received");
            }
            TraceEvent::PageDrained {
                operation,
                page,
                items,
                has_more,
            } => {
                tracing::debug!(operation, page, items, has_more, "Page drained");
            }
            TraceEvent::FaultRaised { operation, message } => {
                tracing::warn!(operation, error = %message, "Operation failed");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&self, _event: TraceEvent) {}
}
