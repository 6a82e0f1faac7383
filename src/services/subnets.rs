//! Subnet owner listing.

use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

use crate::indexer::{fetch, Endpoint, IndexerTransport};
use crate::pagination::{extract_items, with_total_count, Connection, ItemsResponse, PaginationOptions};
use crate::types::SubnetOwner;

const SUBNET_OWNERS_QUERY: &str = "query ($first: Int!, $after: Cursor) {
    subnetOwners(first: $first, after: $after, orderBy: HEIGHT_ASC) {
        nodes { id height owner }
        pageInfo { endCursor hasNextPage hasPreviousPage }
        __TOTAL_COUNT__
    }
}";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubnetOwnersData {
    subnet_owners: Connection<SubnetOwner>,
}

pub async fn get_subnet_owners(transport: &dyn IndexerTransport, options: &PaginationOptions) -> Result<ItemsResponse<SubnetOwner>> {
    let data: SubnetOwnersData = fetch(
        transport,
        Endpoint::Dictionary,
        &with_total_count(SUBNET_OWNERS_QUERY, options),
        json!({ "first": options.limit, "after": options.after }),
    )
    .await?;
    extract_items(data.subnet_owners, options, Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::MockIndexer;

    #[tokio::test]
    async fn owners_page() {
        let indexer = MockIndexer::replying(vec![json!({"subnetOwners": {
            "nodes": [{"id": "1", "height": "812", "owner": "5Grw"}],
            "pageInfo": {"endCursor": "c", "hasNextPage": false, "hasPreviousPage": false},
            "totalCount": 1
        }})]);
        let page = get_subnet_owners(&indexer, &PaginationOptions::first_page(25)).await.unwrap();
        assert_eq!(page.data[0].height, 812);
        assert_eq!(page.total_count, Some(1));
        assert_eq!(indexer.last().variables["first"], json!(25));
    }
}
