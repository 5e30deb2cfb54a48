//! Request descriptors.
//!
//! A descriptor is the store-native shape of one request. Descriptors are
//! built once per call by the MCP request builders and never mutated; the
//! pagination engine derives a fresh descriptor per page with
//! [`QueryRequest::starting_after`].
//!
//! Expression placeholders (`:pk`, `:minAge`, ...) are not cross-checked
//! against `expression_attribute_values`. The backend rejects mismatches
//! and its message is reported verbatim.

use serde::Serialize;
use serde_json::{Map, Value};

/// A document-style row: attribute name to plain JSON value.
pub type Item = Map<String, Value>;

/// Which attributes a scan returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Select {
    #[default]
    AllAttributes,
    /// Return only the number of matching rows.
    Count,
}

impl Select {
    fn is_all_attributes(&self) -> bool {
        *self == Select::AllAttributes
    }
}

/// Scan descriptor (also used for count-mode scans).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanRequest {
    pub table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    #[serde(skip_serializing_if = "Select::is_all_attributes")]
    pub select: Select,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Item>,
}

impl ScanRequest {
    /// A scan of the whole table with no options set.
    pub fn table(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            limit: None,
            filter_expression: None,
            expression_attribute_values: None,
            projection_expression: None,
            select: Select::AllAttributes,
            exclusive_start_key: None,
        }
    }
}

/// Query descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryRequest {
    pub table_name: String,
    pub key_condition_expression: String,
    pub expression_attribute_values: Item,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Item>,
}

impl QueryRequest {
    /// A copy of this request that resumes after `cursor`.
    pub fn starting_after(&self, cursor: Option<Item>) -> Self {
        Self {
            exclusive_start_key: cursor,
            ..self.clone()
        }
    }
}

/// Point lookup descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemRequest {
    pub table_name: String,
    pub key: Item,
}
