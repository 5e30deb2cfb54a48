//! Single-call tool tests.

use super::common::*;
use dynamo_core::{LimitsConfig, Select};
use dynamo_runtime::{StoreError, TraceEvent};
use serde_json::json;

// =============================================================================
// LIST / DESCRIBE
// =============================================================================

pub async fn test_list_tables_returns_names() {
    println!("  🧪 test_list_tables_returns_names");
    let ctx = TestContext::new(standard_store());

    let tables = ctx.call_tool_json("list-tables", json!({})).await;
    assert_eq!(tables, json!(["Users", "Orders"]));

    let empty = TestContext::new(ScriptedStore::new());
    assert_eq!(empty.call_tool_json("list-tables", json!({})).await, json!([]));

    println!("     ✓ Table names returned as a JSON array");
}

pub async fn test_list_tables_failure() {
    println!("  🧪 test_list_tables_failure");
    let ctx = TestContext::new(
        ScriptedStore::new().with_list_error(StoreError::Dispatch("connection refused".to_string())),
    );

    let (is_error, text) = ctx.call_tool("list-tables", json!({})).await;
    assert!(is_error);
    assert_eq!(text, "Error occurred: request dispatch failed: connection refused");

    println!("     ✓ Store failure rendered as an error result");
}

pub async fn test_describe_table() {
    println!("  🧪 test_describe_table");
    let ctx = TestContext::new(standard_store());

    let table = ctx
        .call_tool_json("describe-table", json!({ "tableName": "Users" }))
        .await;
    assert_eq!(table["TableName"], json!("Users"));
    assert_eq!(table["KeySchema"][0]["AttributeName"], json!("id"));
    assert_eq!(table["ItemCount"], json!(3));

    let (is_error, text) = ctx
        .call_tool("describe-table", json!({ "tableName": "Ghost" }))
        .await;
    assert!(is_error);
    assert_eq!(text, format!("Error occurred: {}", NOT_FOUND));

    println!("     ✓ Description returned; missing table reported verbatim");
}

// =============================================================================
// SCAN / COUNT
// =============================================================================

pub async fn test_scan_limit_larger_than_matches() {
    println!("  🧪 test_scan_limit_larger_than_matches");
    let ctx = TestContext::new(standard_store());

    let rows = ctx
        .call_tool_json("scan-table", json!({ "tableName": "Users", "limit": 5 }))
        .await;
    assert_eq!(rows.as_array().unwrap().len(), 3);
    assert_eq!(rows[0]["id"], json!("u1"));

    println!("     ✓ limit=5 over 3 rows returns exactly 3 rows");
}

pub async fn test_scan_default_limit() {
    println!("  🧪 test_scan_default_limit");
    let ctx = TestContext::new(standard_store());
    ctx.call_tool_json("scan-table", json!({ "tableName": "Users" }))
        .await;
    assert_eq!(ctx.store.scans()[0].limit, Some(100));

    let limits = LimitsConfig {
        default_scan_limit: 2,
        ..LimitsConfig::default()
    };
    let ctx = TestContext::with_limits(standard_store(), limits);
    let rows = ctx
        .call_tool_json("scan-table", json!({ "tableName": "Users", "limit": 0 }))
        .await;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    println!("     ✓ Configured default limit applies when limit is absent or zero");
}

pub async fn test_scan_passes_present_options_only() {
    println!("  🧪 test_scan_passes_present_options_only");
    let ctx = TestContext::new(standard_store());

    ctx.call_tool_json(
        "scan-table",
        json!({
            "tableName": "Users",
            "filterExpression": "age > :minAge",
            "expressionAttributeValues": { ":minAge": 30 },
            "projectionExpression": ""
        }),
    )
    .await;

    let scan = &ctx.store.scans()[0];
    assert_eq!(scan.filter_expression.as_deref(), Some("age > :minAge"));
    assert!(scan.expression_attribute_values.is_some());
    assert!(scan.projection_expression.is_none());

    println!("     ✓ Empty optional strings are omitted from the request");
}

pub async fn test_count_items() {
    println!("  🧪 test_count_items");
    let ctx = TestContext::new(standard_store());

    let (is_error, text) = ctx
        .call_tool("count-items", json!({ "tableName": "Users" }))
        .await;
    assert!(!is_error);
    assert_eq!(text, "Table \"Users\" has 3 items.");
    assert_eq!(ctx.store.scans()[0].select, Select::Count);
    assert_eq!(ctx.store.scans().len(), 1);

    let ctx = TestContext::new(standard_store().without_count());
    let (_, text) = ctx
        .call_tool("count-items", json!({ "tableName": "Users" }))
        .await;
    assert_eq!(text, "Table \"Users\" has 0 items.");

    println!("     ✓ Count reported, 0 when the store reports none");
}

// =============================================================================
// GET ITEM
// =============================================================================

pub async fn test_get_item_hit_and_miss() {
    println!("  🧪 test_get_item_hit_and_miss");
    let ctx = TestContext::new(standard_store());

    let row = ctx
        .call_tool_json("get-item", json!({ "tableName": "Users", "key": { "id": "u2" } }))
        .await;
    assert_eq!(row["name"], json!("Brian"));

    let (is_error, text) = ctx
        .call_tool("get-item", json!({ "tableName": "Users", "key": { "id": "nobody" } }))
        .await;
    assert!(!is_error);
    assert_eq!(text, "Could not find the corresponding item.");

    println!("     ✓ Missing key is a not-found success, not an error");
}

// =============================================================================
// QUERY AND ARGUMENT CHECKING
// =============================================================================

pub async fn test_query_missing_key_condition() {
    println!("  🧪 test_query_missing_key_condition");
    let ctx = TestContext::new(standard_store());

    let (is_error, text) = ctx
        .call_tool(
            "query-table",
            json!({ "tableName": "Orders", "expressionAttributeValues": { ":pk": "user#1" } }),
        )
        .await;
    assert!(is_error);
    assert!(text.starts_with("Error occurred: "));
    assert!(text.contains("keyConditionExpression"));
    assert!(ctx.store.queries().is_empty());

    let (is_error, _) = ctx
        .call_tool(
            "query-table",
            json!({
                "tableName": "Orders",
                "keyConditionExpression": "",
                "expressionAttributeValues": { ":pk": "user#1" }
            }),
        )
        .await;
    assert!(is_error);
    assert!(ctx.store.queries().is_empty());

    println!("     ✓ Missing key condition fails before any store call");
}

pub async fn test_query_single_page() {
    println!("  🧪 test_query_single_page");
    let ctx = TestContext::new(
        standard_store()
            .with_query_pages(vec![Ok(dynamo_runtime::Page::more(order_rows("a", 2), cursor("a#1")))]),
    );

    let mut args = query_args();
    args["indexName"] = json!("GSI1");
    args["limit"] = json!(2);

    let rows = ctx.call_tool_json("query-table", args).await;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let queries = ctx.store.queries();
    assert_eq!(queries.len(), 1, "query-table never follows cursors");
    assert_eq!(queries[0].index_name.as_deref(), Some("GSI1"));
    assert_eq!(queries[0].limit, Some(2));

    println!("     ✓ One page only, options passed through");
}

pub async fn test_schema_violation() {
    println!("  🧪 test_schema_violation");
    let ctx = TestContext::new(standard_store());

    let (is_error, text) = ctx
        .call_tool("scan-table", json!({ "tableName": "Users", "limit": "ten" }))
        .await;
    assert!(is_error);
    assert!(text.contains("Invalid arguments for tool scan-table"));
    assert!(ctx.store.scans().is_empty());

    let (is_error, text) = ctx
        .call_tool("scan-table", json!({ "tableName": "Users", "limit": -3 }))
        .await;
    assert!(is_error);
    assert!(text.contains("limit must be a positive integer"));

    println!("     ✓ Bad arguments rejected with a readable message");
}

// =============================================================================
// TRACING
// =============================================================================

pub async fn test_trace_events() {
    println!("  🧪 test_trace_events");
    let ctx = TestContext::new(standard_store());

    ctx.call_tool_json("scan-table", json!({ "tableName": "Users" }))
        .await;
    assert_eq!(ctx.sink.stages(), vec!["request_built", "response_received"]);

    ctx.call_tool("describe-table", json!({ "tableName": "Ghost" }))
        .await;
    let events = ctx.sink.events();
    match events.last().unwrap() {
        TraceEvent::FaultRaised { operation, message } => {
            assert_eq!(*operation, "describe-table");
            assert_eq!(message, NOT_FOUND);
        }
        other => panic!("expected fault event, got {:?}", other),
    }

    println!("     ✓ Lifecycle events recorded per stage");
}

pub async fn run_all_tests() {
    println!("\n📦 Tool tests");
    test_list_tables_returns_names().await;
    test_list_tables_failure().await;
    test_describe_table().await;
    test_scan_limit_larger_than_matches().await;
    test_scan_default_limit().await;
    test_scan_passes_present_options_only().await;
    test_count_items().await;
    test_get_item_hit_and_miss().await;
    test_query_missing_key_condition().await;
    test_query_single_page().await;
    test_schema_violation().await;
    test_trace_events().await;
}
