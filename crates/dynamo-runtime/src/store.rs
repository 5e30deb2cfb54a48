//! The store boundary.

use crate::error::StoreError;
use async_trait::async_trait;
use dynamo_core::{GetItemRequest, Item, QueryRequest, ScanRequest, TableDescription};

/// One round-trip's worth of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Rows in the store's natural order. May be empty.
    pub items: Vec<Item>,
    /// Continuation cursor; absent on the final page.
    pub last_evaluated_key: Option<Item>,
    /// Matching row count, when the store reported one.
    pub count: Option<i32>,
}

impl Page {
    /// Final page holding `items`.
    pub fn last(items: Vec<Item>) -> Self {
        Self {
            items,
            last_evaluated_key: None,
            count: None,
        }
    }

    /// Non-final page holding `items`, continuing after `cursor`.
    pub fn more(items: Vec<Item>, cursor: Item) -> Self {
        Self {
            items,
            last_evaluated_key: Some(cursor),
            count: None,
        }
    }
}

/// Read-only primitives of a key-value/document store.
///
/// One implementation is constructed at startup and shared read-only by every
/// request; implementations must be safe for concurrent use.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Names of all tables visible to the configured credentials.
    async fn list_tables(&self) -> Result<Vec<String>, StoreError>;

    /// Full description of one table.
    async fn describe_table(&self, table_name: &str) -> Result<TableDescription, StoreError>;

    /// One scan page.
    async fn scan(&self, request: &ScanRequest) -> Result<Page, StoreError>;

    /// One query page.
    async fn query(&self, request: &QueryRequest) -> Result<Page, StoreError>;

    /// Point lookup. `Ok(None)` when no row has the key.
    async fn get_item(&self, request: &GetItemRequest) -> Result<Option<Item>, StoreError>;
}
