//! `paginate-query-table` tests.

use super::common::*;
use dynamo_core::LimitsConfig;
use dynamo_runtime::{Page, StoreError, TraceEvent};
use serde_json::json;

pub async fn test_drains_all_pages_in_order() {
    println!("  🧪 test_drains_all_pages_in_order");
    let ctx = TestContext::new(standard_store().with_query_pages(vec![
        Ok(Page::more(order_rows("a", 2), cursor("a#1"))),
        Ok(Page::more(Vec::new(), cursor("a#1-empty"))),
        Ok(Page::last(order_rows("b", 3))),
    ]));

    let rows = ctx.call_tool_json("paginate-query-table", query_args()).await;
    let keys: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["SK"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["a#0", "a#1", "b#0", "b#1", "b#2"]);

    let queries = ctx.store.queries();
    assert_eq!(queries.len(), 3);
    assert!(queries[0].exclusive_start_key.is_none());
    assert_eq!(queries[1].exclusive_start_key, Some(cursor("a#1")));
    assert_eq!(queries[2].exclusive_start_key, Some(cursor("a#1-empty")));

    println!("     ✓ 2 + 0 + 3 rows drained in page order");
}

pub async fn test_fault_on_later_page_returns_no_rows() {
    println!("  🧪 test_fault_on_later_page_returns_no_rows");
    let ctx = TestContext::new(standard_store().with_query_pages(vec![
        Ok(Page::more(order_rows("a", 2), cursor("a#1"))),
        Err(StoreError::Throttled(
            "The level of configured provisioned throughput for the table was exceeded".to_string(),
        )),
        Ok(Page::last(order_rows("c", 1))),
    ]));

    let (is_error, text) = ctx.call_tool("paginate-query-table", query_args()).await;
    assert!(is_error);
    assert_eq!(
        text,
        "Error occurred: The level of configured provisioned throughput for the table was exceeded"
    );
    assert!(!text.contains("a#0"));
    assert_eq!(ctx.store.queries().len(), 2);

    println!("     ✓ Partial results discarded on fault");
}

pub async fn test_stalled_cursor_fails() {
    println!("  🧪 test_stalled_cursor_fails");
    let ctx = TestContext::new(standard_store().with_query_pages(vec![
        Ok(Page::more(order_rows("a", 1), cursor("a#0"))),
        Ok(Page::more(order_rows("a", 1), cursor("a#0"))),
    ]));

    let (is_error, text) = ctx.call_tool("paginate-query-table", query_args()).await;
    assert!(is_error);
    assert!(text.contains("stalled"), "{}", text);

    println!("     ✓ Repeated cursor stops the drain");
}

pub async fn test_page_cap() {
    println!("  🧪 test_page_cap");
    let limits = LimitsConfig {
        max_pages: Some(2),
        ..LimitsConfig::default()
    };
    let ctx = TestContext::with_limits(
        standard_store().with_query_pages(vec![
            Ok(Page::more(order_rows("a", 1), cursor("a#0"))),
            Ok(Page::more(order_rows("b", 1), cursor("b#0"))),
            Ok(Page::last(order_rows("c", 1))),
        ]),
        limits.clone(),
    );

    let (is_error, text) = ctx.call_tool("paginate-query-table", query_args()).await;
    assert!(is_error);
    assert!(text.contains("pagination stopped after 2 pages"), "{}", text);

    let ctx = TestContext::with_limits(
        standard_store().with_query_pages(vec![
            Ok(Page::more(order_rows("a", 1), cursor("a#0"))),
            Ok(Page::last(order_rows("b", 1))),
        ]),
        limits,
    );
    let rows = ctx.call_tool_json("paginate-query-table", query_args()).await;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    println!("     ✓ max_pages enforced only when pages remain");
}

pub async fn test_narrow_parameters() {
    println!("  🧪 test_narrow_parameters");
    let ctx = TestContext::new(standard_store());

    let mut args = query_args();
    args["projectionExpression"] = json!("SK");
    args["limit"] = json!(1);
    ctx.call_tool_json("paginate-query-table", args).await;

    let query = &ctx.store.queries()[0];
    assert_eq!(query.projection_expression.as_deref(), Some("SK"));
    assert_eq!(query.limit, None);

    println!("     ✓ Only projectionExpression is accepted as an option");
}

pub async fn test_page_events() {
    println!("  🧪 test_page_events");
    let ctx = TestContext::new(standard_store().with_query_pages(vec![
        Ok(Page::more(order_rows("a", 2), cursor("a#1"))),
        Ok(Page::last(order_rows("b", 1))),
    ]));

    ctx.call_tool_json("paginate-query-table", query_args()).await;

    let pages: Vec<(u32, usize, bool)> = ctx
        .sink
        .events()
        .into_iter()
        .filter_map(|e| match e {
            TraceEvent::PageDrained {
                page,
                items,
                has_more,
                ..
            } => Some((page, items, has_more)),
            _ => None,
        })
        .collect();
    assert_eq!(pages, vec![(1, 2, true), (2, 1, false)]);

    println!("     ✓ One event per drained page");
}

pub async fn run_all_tests() {
    println!("\n📦 Pagination tests");
    test_drains_all_pages_in_order().await;
    test_fault_on_later_page_returns_no_rows().await;
    test_stalled_cursor_fails().await;
    test_page_cap().await;
    test_narrow_parameters().await;
    test_page_events().await;
}
