//! Event lookup and paged event queries.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::split_name;
use crate::args::parse_optional_args;
use crate::indexer::{fetch, Endpoint, IndexerTransport};
use crate::pagination::{extract_items, with_total_count, Connection, ItemsResponse, PaginationOptions};
use crate::types::{timestamp_flex, u64_flex, Event};
use crate::util_text::zero_pad;

pub const DEFAULT_ORDER: &str = "BLOCK_HEIGHT_DESC";
/// Emission order within a block.
pub const NATURAL_ORDER: &str = "NATURAL";

const EVENT_QUERY: &str = "query ($filter: EventFilter) {
    events(first: 1, offset: 0, filter: $filter, orderBy: BLOCK_HEIGHT_DESC) {
        nodes { id blockHeight extrinsicId module event data }
    }
}";

const EVENTS_QUERY: &str = "query ($first: Int!, $after: Cursor, $filter: EventFilter, $order: [EventsOrderBy!]!) {
    events(orderBy: $order, filter: $filter, first: $first, after: $after) {
        nodes { id module event blockHeight extrinsicId data }
        pageInfo { endCursor hasNextPage hasPreviousPage }
        __TOTAL_COUNT__
    }
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventNode {
    id: String,
    #[serde(deserialize_with = "u64_flex")]
    block_height: u64,
    extrinsic_id: i64,
    module: String,
    event: String,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    call_id: Option<String>,
    #[serde(default, deserialize_with = "timestamp_flex")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    spec_version: Option<u32>,
}

#[derive(Deserialize)]
struct EventsData {
    events: Connection<EventNode>,
}

pub fn by_id(id: &str) -> Value {
    json!({ "id": { "equalTo": id } })
}

/// Events emitted by extrinsic `<height>-<index>`.
pub fn by_extrinsic(block_height: u64, index: i64) -> Value {
    json!({ "and": [
        { "extrinsicId": { "equalTo": index } },
        { "blockHeight": { "equalTo": block_height } },
    ]})
}

pub fn by_name(name: &str) -> Result<Value> {
    let (module, event) = split_name(name)?;
    Ok(json!({ "and": [
        { "module": { "equalTo": module } },
        { "event": { "equalTo": event } },
    ]}))
}

pub async fn get_event(transport: &dyn IndexerTransport, filter: Value) -> Result<Option<Event>> {
    let data: EventsData = fetch(transport, Endpoint::Dictionary, EVENT_QUERY, json!({ "filter": filter })).await?;
    data.events.nodes.into_iter().next().map(transform_event).transpose()
}

pub async fn get_events(
    transport: &dyn IndexerTransport,
    filter: Value,
    order: &str,
    options: &PaginationOptions,
) -> Result<ItemsResponse<Event>> {
    let order = if order.is_empty() { DEFAULT_ORDER } else { order };
    let variables = json!({
        "after": options.after,
        "first": options.limit,
        "filter": filter,
        "order": order,
    });
    let data: EventsData = fetch(transport, Endpoint::Dictionary, &with_total_count(EVENTS_QUERY, options), variables).await?;
    log::debug!("[events] {} nodes order={order}", data.events.nodes.len());
    extract_items(data.events, options, transform_event)
}

pub async fn get_events_by_name(
    transport: &dyn IndexerTransport,
    name: &str,
    order: &str,
    options: &PaginationOptions,
) -> Result<ItemsResponse<Event>> {
    get_events(transport, by_name(name)?, order, options).await
}

fn transform_event(node: EventNode) -> Result<Event> {
    let args = parse_optional_args(node.data.as_deref())?;
    Ok(Event {
        id: node.id,
        block_height: node.block_height,
        extrinsic_id: if node.extrinsic_id == -1 {
            "-1".to_string()
        } else {
            zero_pad(node.extrinsic_id, 4)
        },
        pallet_name: node.module,
        event_name: node.event,
        args,
        call_id: node.call_id,
        timestamp: node.timestamp,
        spec_version: node.spec_version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::Endpoint;
    use crate::services::mock::MockIndexer;

    fn node(extrinsic_id: i64, data: &str) -> Value {
        json!({
            "id": "3014339-0002-1",
            "module": "Balances",
            "event": "Transfer",
            "blockHeight": "3014339",
            "extrinsicId": extrinsic_id,
            "data": data
        })
    }

    #[tokio::test]
    async fn extrinsic_index_is_zero_padded() {
        let indexer = MockIndexer::replying(vec![json!({"events": {"nodes": [node(2, "[\"5Grw\", \"100\"]")]}})]);
        let event = get_event(&indexer, by_id("3014339-0002-1")).await.unwrap().unwrap();
        assert_eq!(event.extrinsic_id, "0002");
        assert_eq!(event.block_height, 3014339);
        assert_eq!(event.args, Some(json!(["5Grw", "100"])));
        assert_eq!(indexer.last().variables["filter"], json!({"id": {"equalTo": "3014339-0002-1"}}));
    }

    #[tokio::test]
    async fn system_events_keep_minus_one() {
        let indexer = MockIndexer::replying(vec![json!({"events": {"nodes": [node(-1, "[]")]}})]);
        let event = get_event(&indexer, by_id("x")).await.unwrap().unwrap();
        assert_eq!(event.extrinsic_id, "-1");
        assert!(!event.in_extrinsic());
    }

    #[tokio::test]
    async fn missing_event_is_none() {
        let indexer = MockIndexer::replying(vec![json!({"events": {"nodes": []}})]);
        assert!(get_event(&indexer, by_id("x")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn first_page_asks_for_total_count() {
        let indexer = MockIndexer::replying(vec![json!({"events": {
            "nodes": [node(1, "{}")],
            "pageInfo": {"endCursor": "c1", "hasNextPage": true, "hasPreviousPage": false},
            "totalCount": 120
        }})]);
        let options = PaginationOptions::first_page(10);
        let page = get_events_by_name(&indexer, "Balances.Transfer", "", &options).await.unwrap();
        assert_eq!(page.total_count, Some(120));
        assert!(page.has_next_page);

        let sent = indexer.last();
        assert_eq!(sent.endpoint, Endpoint::Dictionary);
        assert!(sent.query.contains("totalCount"));
        assert_eq!(sent.variables["order"], json!(DEFAULT_ORDER));
        assert_eq!(sent.variables["first"], json!(10));
        assert_eq!(sent.variables["filter"]["and"][0]["module"]["equalTo"], json!("Balances"));
    }

    #[tokio::test]
    async fn malformed_data_fails_the_page() {
        let indexer = MockIndexer::replying(vec![json!({"events": {"nodes": [node(1, "{broken")]}})]);
        let res = get_events(&indexer, json!({}), DEFAULT_ORDER, &PaginationOptions::first_page(5)).await;
        assert!(res.is_err());
    }

    #[test]
    fn extrinsic_filter_matches_height_and_index() {
        let f = by_extrinsic(10, 2);
        assert_eq!(f["and"][0]["extrinsicId"]["equalTo"], json!(2));
        assert_eq!(f["and"][1]["blockHeight"]["equalTo"], json!(10));
    }
}
