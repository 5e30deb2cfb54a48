//! SDK table descriptions to the core table model.

use aws_sdk_dynamodb::types;
use chrono::{DateTime, Utc};
use dynamo_core::{AttributeDefinition, IndexDescription, KeySchemaElement, TableDescription};

pub fn table_from_sdk(table: &types::TableDescription) -> TableDescription {
    TableDescription {
        table_name: table.table_name().unwrap_or_default().to_string(),
        table_status: table.table_status().map(|s| s.as_str().to_string()),
        key_schema: key_schema(table.key_schema()),
        attribute_definitions: table
            .attribute_definitions()
            .iter()
            .map(|a| AttributeDefinition::new(a.attribute_name(), a.attribute_type().as_str()))
            .collect(),
        global_secondary_indexes: table
            .global_secondary_indexes()
            .iter()
            .map(|index| IndexDescription {
                projection_type: projection_type(index.projection()),
                index_status: index.index_status().map(|s| s.as_str().to_string()),
                item_count: index.item_count(),
                ..IndexDescription::new(
                    index.index_name().unwrap_or_default(),
                    key_schema(index.key_schema()),
                )
            })
            .collect(),
        local_secondary_indexes: table
            .local_secondary_indexes()
            .iter()
            .map(|index| IndexDescription {
                projection_type: projection_type(index.projection()),
                item_count: index.item_count(),
                ..IndexDescription::new(
                    index.index_name().unwrap_or_default(),
                    key_schema(index.key_schema()),
                )
            })
            .collect(),
        item_count: table.item_count(),
        table_size_bytes: table.table_size_bytes(),
        table_arn: table.table_arn().map(str::to_string),
        billing_mode: table
            .billing_mode_summary()
            .and_then(|b| b.billing_mode())
            .map(|m| m.as_str().to_string()),
        creation_date_time: table.creation_date_time().and_then(|t| {
            DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos())
        }),
    }
}

fn key_schema(elements: &[types::KeySchemaElement]) -> Vec<KeySchemaElement> {
    elements
        .iter()
        .map(|e| KeySchemaElement {
            attribute_name: e.attribute_name().to_string(),
            key_type: e.key_type().as_str().to_string(),
        })
        .collect()
}

fn projection_type(projection: Option<&types::Projection>) -> Option<String> {
    projection
        .and_then(|p| p.projection_type())
        .map(|p| p.as_str().to_string())
}
