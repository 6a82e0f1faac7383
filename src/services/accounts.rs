//! Account lookups with address validation, and account statistics from the historical endpoint.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::json;

use crate::indexer::{fetch, Endpoint, IndexerTransport};
use crate::pagination::{ItemsResponse, PageInfo};
use crate::types::{Account, AccountStats};

pub const STATS_DEFAULT_ORDER: &str = "HEIGHT_ASC";
pub const STATS_DEFAULT_LIMIT: u32 = 100;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const ACCOUNT_STATS_QUERY: &str = "query ($first: Int!, $offset: Int!, $order: [AccountStatsOrderBy!]!) {
    accountStats(first: $first, offset: $offset, orderBy: $order) {
        pageInfo { hasNextPage }
        nodes { height active holders total activeHolders id timestamp }
    }
}";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsConnection {
    #[serde(default)]
    page_info: PageInfo,
    nodes: Vec<AccountStats>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountStatsData {
    account_stats: Option<StatsConnection>,
}

/// SS58 (base58, 46 to 48 chars) or a 0x-prefixed 32-byte public key.
pub fn is_valid_address(address: &str) -> bool {
    if let Some(hex) = address.strip_prefix("0x") {
        return hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    (46..=48).contains(&address.len()) && address.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// Account page data. Addresses are shown as given; there is no identity
/// lookup yet.
pub fn get_account(address: &str) -> Result<Account> {
    let address = address.trim();
    if !is_valid_address(address) {
        return Err(anyhow!("Invalid account address"));
    }
    Ok(Account {
        id: address.to_string(),
        address: address.to_string(),
        identity: None,
    })
}

/// Offset-paginated account statistics from the historical indexer.
pub async fn get_account_stats(
    transport: &dyn IndexerTransport,
    offset: u64,
    limit: u32,
    order: &str,
) -> Result<ItemsResponse<AccountStats>> {
    let order = if order.is_empty() { STATS_DEFAULT_ORDER } else { order };
    let data: AccountStatsData = fetch(
        transport,
        Endpoint::Historical,
        ACCOUNT_STATS_QUERY,
        json!({ "first": limit, "offset": offset, "order": order }),
    )
    .await?;
    let Some(stats) = data.account_stats else {
        return Ok(ItemsResponse {
            data: Vec::new(),
            end_cursor: None,
            has_next_page: false,
            has_previous_page: offset > 0,
            total_count: None,
        });
    };
    Ok(ItemsResponse {
        data: stats.nodes,
        end_cursor: None,
        has_next_page: stats.page_info.has_next_page,
        has_previous_page: offset > 0,
        total_count: None,
    })
}
