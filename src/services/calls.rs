//! Call queries against the dictionary endpoint.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::args::parse_args;
use crate::indexer::{fetch, Endpoint, IndexerTransport};
use crate::pagination::{extract_items, with_total_count, Connection, ItemsResponse, PaginationOptions};
use crate::types::{timestamp_flex, u64_flex, Call};

pub const DEFAULT_ORDER: &str = "ID_DESC";

const CALL_QUERY: &str = "query ($filter: CallFilter) {
    calls(first: 1, offset: 0, filter: $filter, orderBy: ID_DESC) {
        nodes { id blockHeight blockId extrinsicId parentId caller success module call args specVersion timestamp }
    }
}";

const CALLS_QUERY: &str = "query ($first: Int!, $after: Cursor, $filter: CallFilter, $order: [CallsOrderBy!]!) {
    calls(first: $first, after: $after, filter: $filter, orderBy: $order) {
        nodes { id blockHeight blockId extrinsicId parentId caller success module call args specVersion timestamp }
        pageInfo { endCursor hasNextPage hasPreviousPage }
        __TOTAL_COUNT__
    }
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallNode {
    id: String,
    #[serde(deserialize_with = "u64_flex")]
    block_height: u64,
    #[serde(default)]
    block_id: Option<String>,
    extrinsic_id: String,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    caller: Option<String>,
    success: bool,
    module: String,
    call: String,
    #[serde(default)]
    args: Option<String>,
    #[serde(default)]
    spec_version: Option<u32>,
    #[serde(default, deserialize_with = "timestamp_flex")]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct CallsData {
    calls: Connection<CallNode>,
}

pub fn by_id(id: &str) -> Value {
    json!({ "id": { "equalTo": id } })
}

pub async fn get_call(transport: &dyn IndexerTransport, filter: Value) -> Result<Option<Call>> {
    let data: CallsData = fetch(transport, Endpoint::Dictionary, CALL_QUERY, json!({ "filter": filter })).await?;
    data.calls.nodes.into_iter().next().map(transform_call).transpose()
}

pub async fn get_calls(
    transport: &dyn IndexerTransport,
    filter: Value,
    order: &str,
    options: &PaginationOptions,
) -> Result<ItemsResponse<Call>> {
    let order = if order.is_empty() { DEFAULT_ORDER } else { order };
    let variables = json!({
        "after": options.after,
        "first": options.limit,
        "filter": filter,
        "order": order,
    });
    let data: CallsData = fetch(transport, Endpoint::Dictionary, &with_total_count(CALLS_QUERY, options), variables).await?;
    extract_items(data.calls, options, transform_call)
}

fn transform_call(node: CallNode) -> Result<Call> {
    let args = match node.args.as_deref() {
        Some(raw) if !raw.trim().is_empty() => parse_args(raw)?,
        _ => Value::Null,
    };
    Ok(Call {
        id: node.id,
        block_height: node.block_height,
        block_id: node.block_id,
        extrinsic_id: node.extrinsic_id,
        parent_id: node.parent_id.filter(|p| !p.is_empty()),
        caller: node.caller.filter(|c| !c.is_empty()),
        success: node.success,
        pallet_name: node.module,
        call_name: node.call,
        args,
        spec_version: node.spec_version,
        timestamp: node.timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockIndexer;

    #[tokio::test]
    async fn call_is_transformed() {
        let indexer = MockIndexer::replying(vec![json!({"calls": {"nodes": [{
            "id": "3014339-0002-1",
            "blockHeight": 3014339,
            "blockId": "0xb10c",
            "extrinsicId": "3014339-0002",
            "parentId": "3014339-0002",
            "caller": "",
            "success": true,
            "module": "Balances",
            "call": "transfer",
            "args": "{\"value\":\"10\"}",
            "specVersion": 143,
            "timestamp": "2024-03-01T10:00:00"
        }]}})]);
        let call = get_call(&indexer, by_id("3014339-0002-1")).await.unwrap().unwrap();
        assert_eq!(call.parent_id.as_deref(), Some("3014339-0002"));
        assert_eq!(call.caller, None);
        assert_eq!(call.args, json!({"value": "10"}));
        assert!(call.timestamp.is_some());
    }

    #[tokio::test]
    async fn calls_page_uses_default_order() {
        let indexer = MockIndexer::replying(vec![json!({"calls": {"nodes": [], "totalCount": 0}})]);
        let page = get_calls(&indexer, json!({}), "", &PaginationOptions::first_page(10)).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total_count, Some(0));
        assert_eq!(indexer.last().variables["order"], json!(DEFAULT_ORDER));
    }
}
