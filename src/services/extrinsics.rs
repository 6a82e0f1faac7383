//! Extrinsic lookup and paged extrinsic queries.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

use super::split_name;
use crate::args::parse_args;
use crate::indexer::{fetch, Endpoint, IndexerTransport};
use crate::pagination::{extract_items, with_total_count, Connection, ItemsResponse, PaginationOptions};
use crate::types::{u64_flex, value_to_u128, Extrinsic};

pub const DEFAULT_ORDER: &str = "ID_DESC";

const EXTRINSIC_QUERY: &str = "query ($filter: ExtrinsicFilter) {
    extrinsics(first: 1, offset: 0, filter: $filter, orderBy: ID_DESC) {
        nodes { id txHash module call signer success tip version blockHeight args }
    }
}";

const EXTRINSICS_QUERY: &str = "query ($first: Int!, $after: Cursor, $filter: ExtrinsicFilter, $order: [ExtrinsicsOrderBy!]!) {
    extrinsics(first: $first, after: $after, filter: $filter, orderBy: $order) {
        nodes { id txHash module call signer success tip version blockHeight args }
        pageInfo { endCursor hasNextPage hasPreviousPage }
        __TOTAL_COUNT__
    }
}";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtrinsicNode {
    id: String,
    tx_hash: String,
    module: String,
    call: String,
    #[serde(default)]
    signer: Option<String>,
    success: bool,
    #[serde(default)]
    tip: Value,
    #[serde(default)]
    version: u32,
    #[serde(deserialize_with = "u64_flex")]
    block_height: u64,
    args: String,
}

#[derive(Deserialize)]
struct ExtrinsicsData {
    extrinsics: Connection<ExtrinsicNode>,
}

pub fn by_id(id: &str) -> Value {
    json!({ "id": { "equalTo": id } })
}

pub fn by_signer(address: &str) -> Value {
    json!({ "signer": { "equalTo": address } })
}

pub fn by_name(name: &str) -> Result<Value> {
    let (module, call) = split_name(name)?;
    Ok(json!({ "and": [
        { "module": { "equalTo": module } },
        { "call": { "equalTo": call } },
    ]}))
}

pub async fn get_extrinsic(transport: &dyn IndexerTransport, filter: Value) -> Result<Option<Extrinsic>> {
    let data: ExtrinsicsData =
        fetch(transport, Endpoint::Dictionary, EXTRINSIC_QUERY, json!({ "filter": filter })).await?;
    data.extrinsics.nodes.into_iter().next().map(transform_extrinsic).transpose()
}

pub async fn get_extrinsics(
    transport: &dyn IndexerTransport,
    filter: Value,
    order: &str,
    options: &PaginationOptions,
) -> Result<ItemsResponse<Extrinsic>> {
    let order = if order.is_empty() { DEFAULT_ORDER } else { order };
    let variables = json!({
        "after": options.after,
        "first": options.limit,
        "filter": filter,
        "order": order,
    });
    let data: ExtrinsicsData =
        fetch(transport, Endpoint::Dictionary, &with_total_count(EXTRINSICS_QUERY, options), variables).await?;
    log::debug!("[extrinsics] {} nodes order={order}", data.extrinsics.nodes.len());
    extract_items(data.extrinsics, options, transform_extrinsic)
}

pub async fn get_extrinsics_by_name(
    transport: &dyn IndexerTransport,
    name: &str,
    order: &str,
    options: &PaginationOptions,
) -> Result<ItemsResponse<Extrinsic>> {
    get_extrinsics(transport, by_name(name)?, order, options).await
}

fn transform_extrinsic(node: ExtrinsicNode) -> Result<Extrinsic> {
    let args = parse_args(&node.args)?;
    Ok(Extrinsic {
        id: node.id,
        tx_hash: node.tx_hash,
        pallet_name: node.module,
        call_name: node.call,
        signer: node.signer.filter(|s| !s.is_empty()),
        success: node.success,
        tip: value_to_u128(&node.tip).unwrap_or(0),
        version: node.version,
        block_height: node.block_height,
        args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockIndexer;

    fn node(signer: Option<&str>, args: &str) -> Value {
        json!({
            "id": "3014339-0002",
            "txHash": "0x5a1d",
            "module": "Balances",
            "call": "transfer_keep_alive",
            "signer": signer,
            "success": true,
            "tip": "1500000000",
            "version": 4,
            "blockHeight": 3014339,
            "args": args
        })
    }

    #[tokio::test]
    async fn args_and_tip_are_decoded() {
        let indexer = MockIndexer::replying(vec![json!({"extrinsics": {"nodes": [
            node(Some("5Grw"), "{\"dest\":\"5Fhj\",\"call\":\"{\\\"method\\\":\\\"remark\\\"}\"}")
        ]}})]);
        let ext = get_extrinsic(&indexer, by_id("3014339-0002")).await.unwrap().unwrap();
        assert_eq!(ext.tip, 1_500_000_000);
        assert_eq!(ext.args, json!({"dest": "5Fhj", "call": {"method": "remark"}}));
        assert_eq!(ext.signer.as_deref(), Some("5Grw"));
    }

    #[tokio::test]
    async fn empty_signer_means_unsigned() {
        let indexer = MockIndexer::replying(vec![json!({"extrinsics": {"nodes": [node(Some(""), "[]")]}})]);
        let ext = get_extrinsic(&indexer, by_id("x")).await.unwrap().unwrap();
        assert_eq!(ext.signer, None);
    }

    #[tokio::test]
    async fn later_pages_skip_total_count() {
        let indexer = MockIndexer::replying(vec![
            json!({"extrinsics": {
                "nodes": [node(None, "[]")],
                "pageInfo": {"endCursor": "c1", "hasNextPage": true, "hasPreviousPage": false},
                "totalCount": 2
            }}),
            json!({"extrinsics": {
                "nodes": [node(None, "[]")],
                "pageInfo": {"endCursor": "c2", "hasNextPage": false, "hasPreviousPage": true},
                "totalCount": 2
            }}),
        ]);
        let mut paginator = crate::pagination::Paginator::new(1);
        let first = get_extrinsics(&indexer, json!({}), "", &paginator.options()).await.unwrap();
        paginator.settle(&first);
        assert_eq!(indexer.last().variables["order"], json!(DEFAULT_ORDER));

        let next = paginator.next().unwrap();
        let second = get_extrinsics(&indexer, json!({}), "BLOCK_HEIGHT_ASC", &next).await.unwrap();
        let sent = indexer.last();
        assert!(!sent.query.contains("totalCount"));
        assert_eq!(sent.variables["after"], json!("c1"));
        assert_eq!(second.total_count, None);
        assert_eq!(paginator.settle(&second).total_count, Some(2));
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let indexer = MockIndexer::failing("connection refused");
        let err = get_extrinsics_by_name(&indexer, "Balances.transfer", "", &PaginationOptions::first_page(5))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
