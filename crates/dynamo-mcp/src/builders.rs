//! Request builders.
//!
//! Each tool reads its arguments into a typed struct (every field optional)
//! and a builder maps that struct into a store request descriptor. Builders
//! are pure: they never touch the store.
//!
//! Optional inputs are dropped when absent. An empty string, an empty map
//! and a zero limit count as absent.

use crate::error::ValidationError;
use dynamo_core::{GetItemRequest, Item, QueryRequest, ScanRequest, Select};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

const LIMIT_EXPECTED: &str = "a positive integer no larger than 2147483647";

/// Arguments naming only a table (`describe-table`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableArgs {
    pub table_name: Option<String>,
}

/// `scan-table` arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanArgs {
    pub table_name: Option<String>,
    pub limit: Option<Number>,
    pub filter_expression: Option<String>,
    pub expression_attribute_values: Option<Item>,
    pub projection_expression: Option<String>,
}

/// `query-table` arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryArgs {
    pub table_name: Option<String>,
    pub key_condition_expression: Option<String>,
    pub expression_attribute_values: Option<Item>,
    pub index_name: Option<String>,
    pub filter_expression: Option<String>,
    pub limit: Option<Number>,
    pub projection_expression: Option<String>,
}

/// `paginate-query-table` arguments. Narrower than [`QueryArgs`]: no limit,
/// index or filter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedQueryArgs {
    pub table_name: Option<String>,
    pub key_condition_expression: Option<String>,
    pub expression_attribute_values: Option<Item>,
    pub projection_expression: Option<String>,
}

/// `get-item` arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetItemArgs {
    pub table_name: Option<String>,
    pub key: Option<Item>,
}

/// `count-items` arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountArgs {
    pub table_name: Option<String>,
    pub filter_expression: Option<String>,
    pub expression_attribute_values: Option<Item>,
}

/// Read raw tool arguments into an argument struct. `null` reads as "no
/// arguments".
pub fn parse_args<T>(arguments: Value) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Default,
{
    match arguments {
        Value::Null => Ok(T::default()),
        other => {
            serde_json::from_value(other).map_err(|e| ValidationError::Malformed(e.to_string()))
        }
    }
}

pub fn describe_table(args: TableArgs) -> Result<String, ValidationError> {
    table_name(args.table_name)
}

/// Scan descriptor. `default_limit` applies when no limit was given.
pub fn scan(args: ScanArgs, default_limit: i32) -> Result<ScanRequest, ValidationError> {
    Ok(ScanRequest {
        table_name: table_name(args.table_name)?,
        limit: Some(row_limit(args.limit)?.unwrap_or(default_limit)),
        filter_expression: present(args.filter_expression),
        expression_attribute_values: present_map(args.expression_attribute_values),
        projection_expression: present(args.projection_expression),
        select: Select::AllAttributes,
        exclusive_start_key: None,
    })
}

pub fn query(args: QueryArgs) -> Result<QueryRequest, ValidationError> {
    Ok(QueryRequest {
        table_name: table_name(args.table_name)?,
        key_condition_expression: required(
            "keyConditionExpression",
            args.key_condition_expression,
        )?,
        expression_attribute_values: args
            .expression_attribute_values
            .ok_or(ValidationError::MissingField("expressionAttributeValues"))?,
        index_name: present(args.index_name),
        filter_expression: present(args.filter_expression),
        limit: row_limit(args.limit)?,
        projection_expression: present(args.projection_expression),
        exclusive_start_key: None,
    })
}

pub fn paginated_query(args: PaginatedQueryArgs) -> Result<QueryRequest, ValidationError> {
    query(QueryArgs {
        table_name: args.table_name,
        key_condition_expression: args.key_condition_expression,
        expression_attribute_values: args.expression_attribute_values,
        projection_expression: args.projection_expression,
        ..QueryArgs::default()
    })
}

pub fn get_item(args: GetItemArgs) -> Result<GetItemRequest, ValidationError> {
    let table_name = table_name(args.table_name)?;
    let key = present_map(args.key).ok_or(ValidationError::MissingField("key"))?;
    Ok(GetItemRequest { table_name, key })
}

/// Count-mode scan. One request; no limit.
pub fn count(args: CountArgs) -> Result<ScanRequest, ValidationError> {
    Ok(ScanRequest {
        filter_expression: present(args.filter_expression),
        expression_attribute_values: present_map(args.expression_attribute_values),
        select: Select::Count,
        ..ScanRequest::table(table_name(args.table_name)?)
    })
}

fn table_name(value: Option<String>) -> Result<String, ValidationError> {
    required("tableName", value)
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    present(value).ok_or(ValidationError::MissingField(field))
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn present_map(value: Option<Item>) -> Option<Item> {
    value.filter(|m| !m.is_empty())
}

/// Zero reads as absent. Whole-valued floats (`5.0`) are accepted.
fn row_limit(limit: Option<Number>) -> Result<Option<i32>, ValidationError> {
    let Some(limit) = limit else {
        return Ok(None);
    };

    let whole = match limit.as_i64() {
        Some(n) => Some(n),
        None => limit
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= f64::from(i32::MAX))
            .map(|f| f as i64),
    };

    match whole {
        Some(0) => Ok(None),
        Some(n) if n > 0 => i32::try_from(n).map(Some).map_err(|_| invalid_limit()),
        _ => Err(invalid_limit()),
    }
}

fn invalid_limit() -> ValidationError {
    ValidationError::InvalidField {
        field: "limit",
        expected: LIMIT_EXPECTED,
    }
}
