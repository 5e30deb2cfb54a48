//! JSON <-> AttributeValue conversions.
//!
//! Works like a document client: callers pass and receive plain JSON, and
//! the typed wire format stays inside this adapter.
//!
//! | JSON    | AttributeValue |
//! |---------|----------------|
//! | string  | `S`            |
//! | number  | `N`            |
//! | boolean | `BOOL`         |
//! | null    | `NULL`         |
//! | array   | `L`            |
//! | object  | `M`            |
//!
//! Reading back, string and number sets become arrays and binary values
//! become base64 strings. A number that a 64-bit float cannot hold exactly
//! (more than about 17 significant digits) is a conversion error rather than
//! a rounded value.

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bigdecimal::BigDecimal;
use dynamo_core::Item;
use dynamo_runtime::StoreError;
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::str::FromStr;

/// Convert one JSON value.
pub fn to_attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_attribute_value).collect()),
        Value::Object(map) => AttributeValue::M(to_attribute_map(map)),
    }
}

/// Convert a JSON object (an item, key or placeholder mapping).
pub fn to_attribute_map(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), to_attribute_value(value)))
        .collect()
}

/// Convert one attribute value back to JSON.
pub fn from_attribute_value(value: &AttributeValue) -> Result<Value, StoreError> {
    let converted = match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_value(n)?,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(from_attribute_value)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(from_attribute_map(map)?),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| number_value(n))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::B(blob) => blob_value(blob),
        AttributeValue::Bs(blobs) => Value::Array(blobs.iter().map(blob_value).collect()),
        other => {
            return Err(StoreError::Conversion(format!(
                "unsupported attribute value: {:?}",
                other
            )));
        }
    };
    Ok(converted)
}

/// Convert a returned item back to JSON.
pub fn from_attribute_map(map: &HashMap<String, AttributeValue>) -> Result<Item, StoreError> {
    map.iter()
        .map(|(name, value)| Ok((name.clone(), from_attribute_value(value)?)))
        .collect()
}

/// Convert an optional list of returned items.
pub fn from_attribute_maps(
    items: Option<Vec<HashMap<String, AttributeValue>>>,
) -> Result<Vec<Item>, StoreError> {
    items
        .unwrap_or_default()
        .iter()
        .map(from_attribute_map)
        .collect()
}

fn number_value(raw: &str) -> Result<Value, StoreError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Value::from(u));
    }

    let invalid = || StoreError::Conversion(format!("invalid number: {}", raw));
    let exact = BigDecimal::from_str(raw).map_err(|_| invalid())?;
    let float = raw.parse::<f64>().map_err(|_| invalid())?;

    // `Display` for f64 prints the shortest decimal that reads back as the
    // same float; it must denote the stored value.
    let shortest = BigDecimal::from_str(&float.to_string()).map_err(|_| invalid())?;
    if shortest != exact {
        return Err(StoreError::Conversion(format!(
            "number {} cannot be represented without losing precision",
            raw
        )));
    }

    Number::from_f64(float)
        .map(Value::Number)
        .ok_or_else(invalid)
}

fn blob_value(blob: &Blob) -> Value {
    Value::String(STANDARD.encode(blob.as_ref()))
}
