//! Query-help prompt tests.

use super::common::*;
use dynamo_mcp::protocol::INVALID_PARAMS;
use serde_json::{Value, json};

fn prompt_text(result: &Value) -> &str {
    assert_eq!(result["messages"][0]["role"], json!("user"));
    result["messages"][0]["content"]["text"].as_str().unwrap()
}

pub async fn test_prompt_listed() {
    println!("  🧪 test_prompt_listed");
    let ctx = TestContext::new(standard_store());

    let result = ctx.rpc("prompts/list", json!({})).await.result.unwrap();
    let prompt = &result["prompts"][0];
    assert_eq!(prompt["name"], json!("dynamodb-query-help"));
    assert_eq!(prompt["arguments"][0]["name"], json!("tableName"));
    assert_eq!(prompt["arguments"][0]["required"], json!(true));

    println!("     ✓ dynamodb-query-help advertised");
}

pub async fn test_basic_guide() {
    println!("  🧪 test_basic_guide");
    let ctx = TestContext::new(standard_store());

    let result = ctx
        .rpc(
            "prompts/get",
            json!({ "name": "dynamodb-query-help", "arguments": { "tableName": "Users" } }),
        )
        .await
        .result
        .unwrap();
    let text = prompt_text(&result);
    assert!(text.contains("# Basic query guide for table Users"));
    assert!(text.contains("\"AttributeName\": \"id\""));
    assert_eq!(result["description"], json!("DynamoDB query help for table Users"));

    println!("     ✓ Basic guide embeds the key schema");
}

pub async fn test_advanced_guide_lists_globals() {
    println!("  🧪 test_advanced_guide_lists_globals");
    let ctx = TestContext::new(standard_store());

    let result = ctx
        .rpc(
            "prompts/get",
            json!({
                "name": "dynamodb-query-help",
                "arguments": { "tableName": "Orders", "queryType": "advanced" }
            }),
        )
        .await
        .result
        .unwrap();
    let text = prompt_text(&result);
    assert!(text.contains("# Advanced query guide for table Orders"));
    assert!(text.contains("BETWEEN"));
    assert!(text.contains("This table has the following GSIs:\n- GSI1\n- GSI2"));
    assert!(!text.contains("- ByCreatedAt"));

    let result = ctx
        .rpc(
            "prompts/get",
            json!({
                "name": "dynamodb-query-help",
                "arguments": { "tableName": "Users", "queryType": "expert" }
            }),
        )
        .await
        .result
        .unwrap();
    assert!(prompt_text(&result).contains("This table has no GSI."));

    println!("     ✓ Advanced guide selected by any non-basic type");
}

pub async fn test_fallback_guide() {
    println!("  🧪 test_fallback_guide");
    let ctx = TestContext::new(standard_store());

    let result = ctx
        .rpc(
            "prompts/get",
            json!({ "name": "dynamodb-query-help", "arguments": { "tableName": "Ghost" } }),
        )
        .await
        .result
        .unwrap();
    let text = prompt_text(&result);
    assert!(text.contains("\"Ghost\": Requested resource not found"));
    for tool in [
        "list-tables",
        "describe-table",
        "scan-table",
        "query-table",
        "paginate-query-table",
        "get-item",
        "count-items",
    ] {
        assert!(text.contains(&format!("'{}'", tool)), "missing {}", tool);
    }

    println!("     ✓ Unknown table yields the general guide");
}

pub async fn test_prompt_errors() {
    println!("  🧪 test_prompt_errors");
    let ctx = TestContext::new(standard_store());

    let response = ctx
        .rpc("prompts/get", json!({ "name": "sql-help", "arguments": {} }))
        .await;
    assert_eq!(response.error.unwrap().code, INVALID_PARAMS);

    let response = ctx
        .rpc("prompts/get", json!({ "name": "dynamodb-query-help", "arguments": {} }))
        .await;
    let error = response.error.unwrap();
    assert_eq!(error.code, INVALID_PARAMS);
    assert!(error.message.contains("tableName"));

    println!("     ✓ Unknown prompt and missing table name rejected");
}

pub async fn run_all_tests() {
    println!("\n📦 Prompt tests");
    test_prompt_listed().await;
    test_basic_guide().await;
    test_advanced_guide_lists_globals().await;
    test_fallback_guide().await;
    test_prompt_errors().await;
}
