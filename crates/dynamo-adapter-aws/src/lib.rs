//! DynamoDB store adapter.
//!
//! [`DynamoDbAdapter`] implements `TableStore` over `aws-sdk-dynamodb`. It
//! builds the client from [`AwsConfig`], converts between JSON and typed
//! attribute values, and classifies SDK failures into `StoreError`.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types;
use dynamo_core::{
    AwsConfig, ConfigError, GetItemRequest, Item, QueryRequest, ScanRequest, Select,
    TableDescription,
};
use dynamo_runtime::{Page, StoreError, TableStore};
use std::future::Future;

pub mod client;
pub mod conversions;
pub mod describe;
pub mod error;

use conversions::{from_attribute_map, from_attribute_maps, to_attribute_map};
use error::map_sdk_error;

pub use client::create_client;

/// `TableStore` backed by the AWS DynamoDB API.
#[derive(Debug, Clone)]
pub struct DynamoDbAdapter {
    client: Client,
}

impl DynamoDbAdapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Validate `config` and build the client.
    pub async fn connect(config: &AwsConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(create_client(config).await?))
    }
}

#[async_trait]
impl TableStore for DynamoDbAdapter {
    async fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        let names = collect_table_names(|start| async move {
            let output = self
                .client
                .list_tables()
                .set_exclusive_start_table_name(start)
                .send()
                .await
                .map_err(|e| map_sdk_error("ListTables", e))?;
            Ok::<_, StoreError>((
                output.table_names.unwrap_or_default(),
                output.last_evaluated_table_name,
            ))
        })
        .await?;

        tracing::debug!(tables = names.len(), "listed tables");
        Ok(names)
    }

    async fn describe_table(&self, table_name: &str) -> Result<TableDescription, StoreError> {
        let output = self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| map_sdk_error("DescribeTable", e))?;

        output
            .table
            .as_ref()
            .map(describe::table_from_sdk)
            .ok_or_else(|| {
                StoreError::ResourceNotFound(format!("Table {} was not described", table_name))
            })
    }

    async fn scan(&self, request: &ScanRequest) -> Result<Page, StoreError> {
        let select = match request.select {
            Select::Count => Some(types::Select::Count),
            Select::AllAttributes => None,
        };

        let output = self
            .client
            .scan()
            .table_name(&request.table_name)
            .set_limit(request.limit)
            .set_filter_expression(request.filter_expression.clone())
            .set_expression_attribute_values(
                request.expression_attribute_values.as_ref().map(to_attribute_map),
            )
            .set_projection_expression(request.projection_expression.clone())
            .set_select(select)
            .set_exclusive_start_key(request.exclusive_start_key.as_ref().map(to_attribute_map))
            .send()
            .await
            .map_err(|e| map_sdk_error("Scan", e))?;

        Ok(Page {
            items: from_attribute_maps(output.items)?,
            last_evaluated_key: output
                .last_evaluated_key
                .as_ref()
                .map(from_attribute_map)
                .transpose()?,
            count: Some(output.count),
        })
    }

    async fn query(&self, request: &QueryRequest) -> Result<Page, StoreError> {
        let output = self
            .client
            .query()
            .table_name(&request.table_name)
            .key_condition_expression(&request.key_condition_expression)
            .set_expression_attribute_values(Some(to_attribute_map(
                &request.expression_attribute_values,
            )))
            .set_index_name(request.index_name.clone())
            .set_filter_expression(request.filter_expression.clone())
            .set_limit(request.limit)
            .set_projection_expression(request.projection_expression.clone())
            .set_exclusive_start_key(request.exclusive_start_key.as_ref().map(to_attribute_map))
            .send()
            .await
            .map_err(|e| map_sdk_error("Query", e))?;

        Ok(Page {
            items: from_attribute_maps(output.items)?,
            last_evaluated_key: output
                .last_evaluated_key
                .as_ref()
                .map(from_attribute_map)
                .transpose()?,
            count: Some(output.count),
        })
    }

    async fn get_item(&self, request: &GetItemRequest) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&request.table_name)
            .set_key(Some(to_attribute_map(&request.key)))
            .send()
            .await
            .map_err(|e| map_sdk_error("GetItem", e))?;

        output.item.as_ref().map(from_attribute_map).transpose()
    }
}

/// Follow ListTables continuation names until a page arrives without one.
///
/// `fetch` receives the name to resume after and returns one page of names
/// plus the next continuation name.
async fn collect_table_names<F, Fut>(mut fetch: F) -> Result<Vec<String>, StoreError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<String>, Option<String>), StoreError>>,
{
    let mut names = Vec::new();
    let mut start: Option<String> = None;
    let mut page: u32 = 0;

    loop {
        page += 1;
        let sent = start.clone();
        let (batch, next) = fetch(start.take()).await?;
        names.extend(batch);

        match next {
            None => break,
            Some(next) if sent.as_deref() == Some(next.as_str()) => {
                return Err(StoreError::StalledCursor { page });
            }
            Some(next) => start = Some(next),
        }
    }

    Ok(names)
}
