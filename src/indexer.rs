//! GraphQL transport to the indexing service.
//!
//! Services talk to an [`IndexerTransport`]; the binary wires in
//! [`HttpIndexer`], tests use an in-memory transport.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::net::send_with_backoff;

/// Which indexer a query goes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Events, extrinsics, calls, subnet owners.
    Dictionary,
    /// Time series such as account statistics.
    Historical,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Dictionary => write!(f, "dictionary"),
            Endpoint::Historical => write!(f, "historical"),
        }
    }
}

#[async_trait]
pub trait IndexerTransport: Send + Sync {
    /// Run `query` and return its `data` object.
    async fn query(&self, endpoint: Endpoint, query: &str, variables: Value) -> Result<Value>;
}

/// Run a query and deserialize its `data` into `T`.
pub async fn fetch<T: DeserializeOwned>(
    transport: &dyn IndexerTransport,
    endpoint: Endpoint,
    query: &str,
    variables: Value,
) -> Result<T> {
    let data = transport.query(endpoint, query, variables).await?;
    serde_json::from_value(data).with_context(|| format!("unexpected {endpoint} response shape"))
}

#[derive(Clone, Debug)]
pub struct IndexerSettings {
    pub dictionary_url: String,
    pub historical_url: String,
    pub auth_token: Option<String>,
    pub timeout_ms: u64,
    pub retries: u8,
}

static HTTP: OnceLock<reqwest::Client> = OnceLock::new();

fn http_client() -> &'static reqwest::Client {
    HTTP.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(8)
            .tcp_nodelay(true)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("[indexer] falling back to default http client: {e}");
                reqwest::Client::new()
            })
    })
}

/// JSON-over-HTTP GraphQL client.
#[derive(Clone, Debug)]
pub struct HttpIndexer {
    settings: IndexerSettings,
}

impl HttpIndexer {
    pub fn new(settings: IndexerSettings) -> Self {
        Self { settings }
    }

    fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Dictionary => &self.settings.dictionary_url,
            Endpoint::Historical => &self.settings.historical_url,
        }
    }
}

/// Pull `data` out of a GraphQL response, surfacing `errors`.
pub fn graphql_data(mut body: Value) -> Result<Value> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array).filter(|e| !e.is_empty()) {
        let messages: Vec<&str> = errors
            .iter()
            .map(|e| e.get("message").and_then(Value::as_str).unwrap_or("unknown error"))
            .collect();
        return Err(anyhow!("graphql: {}", messages.join("; ")));
    }
    match body.get_mut("data").map(Value::take) {
        Some(Value::Null) | None => Err(anyhow!("graphql response has no data")),
        Some(data) => Ok(data),
    }
}

#[async_trait]
impl IndexerTransport for HttpIndexer {
    async fn query(&self, endpoint: Endpoint, query: &str, variables: Value) -> Result<Value> {
        let url = self.url(endpoint);
        let mut req = http_client()
            .post(url)
            .json(&json!({ "query": query, "variables": variables }))
            .timeout(Duration::from_millis(self.settings.timeout_ms));
        if let Some(token) = &self.settings.auth_token {
            req = req.bearer_auth(token);
        }

        log::debug!("[indexer] POST {endpoint} {url}");
        let res = send_with_backoff(req, &format!("{endpoint} query"), self.settings.retries).await?;
        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("{endpoint} indexer returned http {status}"));
        }
        let body: Value = res
            .json()
            .await
            .with_context(|| format!("{endpoint} indexer returned invalid json"))?;
        graphql_data(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_is_extracted() {
        let data = graphql_data(json!({"data": {"events": {"nodes": []}}})).unwrap();
        assert_eq!(data, json!({"events": {"nodes": []}}));
    }

    #[test]
    fn errors_are_surfaced() {
        let err = graphql_data(json!({
            "data": null,
            "errors": [{"message": "Cannot query field \"foo\""}, {"message": "second"}]
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "graphql: Cannot query field \"foo\"; second");
    }

    #[test]
    fn missing_data_is_an_error() {
        assert!(graphql_data(json!({"data": null})).is_err());
        assert!(graphql_data(json!({})).is_err());
        // An empty errors list is not a failure.
        assert!(graphql_data(json!({"data": {}, "errors": []})).is_ok());
    }
}
