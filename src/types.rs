use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::services::FetchOutcome;
use crate::table::Identified;

/// Signed extrinsic, as shown on the extrinsic screen and in lists.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Extrinsic {
    /// `<block height>-<index>`, index zero-padded to four digits.
    pub id: String,
    pub tx_hash: String,
    pub pallet_name: String,
    pub call_name: String,
    pub signer: Option<String>,
    pub success: bool,
    /// Tip in rao.
    pub tip: u128,
    pub version: u32,
    pub block_height: u64,
    pub args: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    pub block_height: u64,
    /// Zero-padded extrinsic index, or `-1` for events emitted outside an extrinsic.
    pub extrinsic_id: String,
    pub pallet_name: String,
    pub event_name: String,
    pub args: Option<Value>,
    pub call_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub spec_version: Option<u32>,
}

impl Event {
    pub fn in_extrinsic(&self) -> bool {
        self.extrinsic_id != "-1"
    }

    /// Id of the owning extrinsic in `<height>-<index>` form.
    pub fn extrinsic_ref(&self) -> Option<String> {
        self.in_extrinsic().then(|| format!("{}-{}", self.block_height, self.extrinsic_id))
    }
}

/// A (possibly nested) call inside an extrinsic.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Call {
    pub id: String,
    pub block_height: u64,
    pub block_id: Option<String>,
    pub extrinsic_id: String,
    pub parent_id: Option<String>,
    pub caller: Option<String>,
    pub success: bool,
    pub pallet_name: String,
    pub call_name: String,
    pub args: Value,
    pub spec_version: Option<u32>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Account {
    pub id: String,
    pub address: String,
    pub identity: Option<String>,
}

/// Chain-wide account counters at one height.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub id: String,
    #[serde(deserialize_with = "u64_flex")]
    pub height: u64,
    #[serde(deserialize_with = "u64_flex")]
    pub active: u64,
    #[serde(deserialize_with = "u64_flex")]
    pub holders: u64,
    #[serde(deserialize_with = "u64_flex")]
    pub total: u64,
    #[serde(deserialize_with = "u64_flex")]
    pub active_holders: u64,
    #[serde(default, deserialize_with = "timestamp_flex")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Registration of a subnet by its owner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubnetOwner {
    pub id: String,
    #[serde(deserialize_with = "u64_flex")]
    pub height: u64,
    pub owner: String,
}

impl Identified for Extrinsic {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Event {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Call {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for AccountStats {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for SubnetOwner {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Fetched(FetchOutcome),
    Quit,
}

/// Indexers serialize big integers as strings; accept both.
pub(crate) fn u64_flex<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let v = Value::deserialize(d)?;
    value_to_u128(&v)
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("expected unsigned integer, got {v}")))
}

pub(crate) fn timestamp_flex<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let v = Option::<String>::deserialize(d)?;
    Ok(v.as_deref().and_then(crate::util_text::parse_timestamp))
}

/// Number or numeric string to `u128`.
pub(crate) fn value_to_u128(v: &Value) -> Option<u128> {
    match v {
        Value::Number(n) => n.as_u64().map(u128::from),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
