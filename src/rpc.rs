use anyhow::Result;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Failures reported by the JSON-RPC node itself.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("rate_limited")]
    RateLimited,
    #[error("node error {code}: {message}")]
    Node { code: i64, message: String },
    #[error("response for {0} carried neither result nor error")]
    MissingResult(String),
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Minimal Ethereum JSON-RPC client: just enough for read-only contract calls.
pub struct JsonRpcApi {
    api_url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl JsonRpcApi {
    pub fn new(api_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self::with_client(api_url, client)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn with_client(api_url: &str, client: reqwest::Client) -> Self {
        Self {
            api_url: crate::utils::remove_trailing_slash(api_url),
            client,
            next_id: AtomicU64::new(1),
        }
    }

    fn build_request(&self, method: &str, params: serde_json::Value) -> serde_json::Value {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        })
    }

    async fn send(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let body = self.build_request(method, params);
        let response = self.client.post(&self.api_url).json(&body).send().await?;
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RpcError::RateLimited.into());
        }
        let text = response.text().await?;
        parse_response(method, &text)
    }

    /// Call a JSON-RPC method, retrying only when the node rate-limits us.
    pub async fn request(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        crate::utils::retry_if(
            5,
            500,
            || self.send(method, params.clone()),
            |e: &anyhow::Error| matches!(e.downcast_ref::<RpcError>(), Some(RpcError::RateLimited)),
        )
        .await
    }

    /// `eth_call` against the latest block. Returns the raw `0x…` result.
    pub async fn eth_call(&self, to: &str, data: &str) -> Result<String> {
        let params = serde_json::json!([{ "to": to, "data": data }, "latest"]);
        let result = self.request("eth_call", params).await?;
        result
            .as_str()
            .map(String::from)
            .ok_or_else(|| anyhow::anyhow!("eth_call returned non-string result: {}", result))
    }
}

fn parse_response(method: &str, body: &str) -> Result<serde_json::Value> {
    let parsed: RpcResponse = serde_json::from_str(body)
        .map_err(|e| anyhow::anyhow!("invalid JSON-RPC response for {}: {}", method, e))?;
    if let Some(err) = parsed.error {
        return Err(RpcError::Node {
            code: err.code,
            message: err.message,
        }
        .into());
    }
    parsed
        .result
        .ok_or_else(|| RpcError::MissingResult(method.to_string()).into())
}
