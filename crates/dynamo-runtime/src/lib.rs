//! # dynamo-runtime
//!
//! The execution side of the query layer:
//!
//! - [`store::TableStore`]: the read-only primitives a backend must provide
//! - [`pagination`]: draining a paged result stream into one list
//! - [`trace`]: lifecycle events on a side channel

pub mod error;
pub mod pagination;
pub mod store;
pub mod trace;

pub use error::StoreError;
pub use pagination::{DrainOptions, drain_pages, drain_query, with_deadline};
pub use store::{Page, TableStore};
pub use trace::{NullSink, TraceEvent, TraceSink, TracingSink};
