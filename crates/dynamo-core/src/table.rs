//! Table descriptions and the condensed schema summary.
//!
//! [`TableDescription`] mirrors the store's own description format (PascalCase
//! field names) so `describe-table` output reads like the AWS console and CLI.
//! [`TableSchemaSummary`] is the reduced view served to schema-introspection
//! callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One element of a primary or index key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    pub attribute_name: String,
    /// `HASH` or `RANGE`.
    pub key_type: String,
}

impl KeySchemaElement {
    pub fn hash(name: impl Into<String>) -> Self {
        Self {
            attribute_name: name.into(),
            key_type: "HASH".to_string(),
        }
    }

    pub fn range(name: impl Into<String>) -> Self {
        Self {
            attribute_name: name.into(),
            key_type: "RANGE".to_string(),
        }
    }
}

/// Declared type of a key attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    pub attribute_name: String,
    /// `S`, `N` or `B`.
    pub attribute_type: String,
}

impl AttributeDefinition {
    pub fn new(name: impl Into<String>, attribute_type: impl Into<String>) -> Self {
        Self {
            attribute_name: name.into(),
            attribute_type: attribute_type.into(),
        }
    }
}

/// A global or local secondary index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexDescription {
    pub index_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,
}

impl IndexDescription {
    pub fn new(name: impl Into<String>, key_schema: Vec<KeySchemaElement>) -> Self {
        Self {
            index_name: name.into(),
            key_schema,
            projection_type: None,
            index_status: None,
            item_count: None,
        }
    }
}

/// Full description of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescription {
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_status: Option<String>,
    #[serde(default)]
    pub key_schema: Vec<KeySchemaElement>,
    #[serde(default)]
    pub attribute_definitions: Vec<AttributeDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_secondary_indexes: Vec<IndexDescription>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub local_secondary_indexes: Vec<IndexDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_size_bytes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date_time: Option<DateTime<Utc>>,
}

impl TableDescription {
    /// A description with only a name; everything else empty.
    pub fn named(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            table_status: None,
            key_schema: Vec::new(),
            attribute_definitions: Vec::new(),
            global_secondary_indexes: Vec::new(),
            local_secondary_indexes: Vec::new(),
            item_count: None,
            table_size_bytes: None,
            table_arn: None,
            billing_mode: None,
            creation_date_time: None,
        }
    }

    /// Reduce this description to its schema summary.
    ///
    /// Indices are listed globals first, then locals, each keeping only its
    /// name and key schema.
    pub fn summarize(&self) -> TableSchemaSummary {
        let indices = self
            .global_secondary_indexes
            .iter()
            .chain(self.local_secondary_indexes.iter())
            .map(|index| IndexSummary {
                name: index.index_name.clone(),
                key_schema: index.key_schema.clone(),
            })
            .collect();

        TableSchemaSummary {
            key_schema: self.key_schema.clone(),
            attribute_definitions: self.attribute_definitions.clone(),
            indices,
        }
    }
}

/// Condensed schema view of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchemaSummary {
    pub key_schema: Vec<KeySchemaElement>,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub indices: Vec<IndexSummary>,
}

/// A secondary index reduced to name and key schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSummary {
    pub name: String,
    pub key_schema: Vec<KeySchemaElement>,
}
