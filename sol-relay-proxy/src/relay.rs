use crate::{
    error::RelayError,
    models::jsonrpc::{JsonRpcRequest, JsonRpcResponse, TokenLargestAccounts},
};
use eyre::Result;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Bound on any single outbound call; a hung upstream must not pin a request forever
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the upstream RPC provider and the metadata endpoint
///
/// This client owns every outbound call the proxy makes. Relayed bodies pass
/// through as opaque JSON; only the holder lookup interprets what comes back.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    rpc_url: String,
    token_info_url: String,
}

impl RelayClient {
    /// Create a relay client for the given upstream endpoints
    ///
    /// The underlying `reqwest` client carries a 10 second timeout covering
    /// connection and body transfer; beyond that, no transport tuning.
    pub fn new(rpc_url: &str, token_info_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            rpc_url: rpc_url.to_string(),
            token_info_url: token_info_url.to_string(),
        })
    }

    /// Forward an RPC envelope verbatim to the upstream provider
    ///
    /// The body is re-serialized as-is and POSTed with
    /// `Content-Type: application/json`; `id` and `jsonrpc` are untouched.
    /// The upstream's parsed JSON comes back whole, including any RPC-level
    /// error payload it may encode. Transport failures and non-JSON bodies
    /// surface as [`RelayError::Upstream`]; no retry is attempted.
    #[instrument(skip(self, body))]
    pub async fn forward_rpc(&self, body: &Value) -> Result<Value, RelayError> {
        debug!("Forwarding RPC request to upstream");

        let response = self
            .http
            .post(&self.rpc_url)
            .json(body)
            .send()
            .await
            .map_err(|e| RelayError::Upstream(format!("request failed: {}", e)))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| RelayError::Upstream(format!("invalid upstream body: {}", e)))
    }

    /// Fetch the fixed token-metadata document and relay it verbatim
    #[instrument(skip(self))]
    pub async fn fetch_token_info(&self) -> Result<Value, RelayError> {
        debug!("Fetching token info from metadata provider");

        let response = self
            .http
            .get(&self.token_info_url)
            .send()
            .await
            .map_err(|e| RelayError::TokenInfo(format!("request failed: {}", e)))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| RelayError::TokenInfo(format!("invalid metadata body: {}", e)))
    }

    /// Count the holders of a mint via an on-chain token-account lookup
    ///
    /// Issues a `getTokenLargestAccounts` call against the upstream RPC and
    /// counts the returned accounts with a strictly positive parsed amount.
    /// Accounts with a zero or absent balance do not count as holders. A
    /// missing or malformed result shape is a [`RelayError::Holders`].
    #[instrument(skip(self), err)]
    pub async fn count_holders(&self, mint: &str) -> Result<usize, RelayError> {
        debug!("Looking up token accounts for mint {}", mint);

        let request = JsonRpcRequest::new("getTokenLargestAccounts", vec![mint.to_string()]);

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::Holders(format!("request failed: {}", e)))?;

        let envelope: JsonRpcResponse<TokenLargestAccounts> = response
            .json()
            .await
            .map_err(|e| RelayError::Holders(format!("invalid upstream body: {}", e)))?;

        if let Some(rpc_error) = &envelope.error {
            error!("Holder lookup rejected by upstream: {}", rpc_error);
            return Err(RelayError::Holders(format!("rpc error: {}", rpc_error)));
        }

        let accounts = envelope
            .result
            .ok_or_else(|| RelayError::Holders("missing result in upstream body".to_string()))?;

        Ok(accounts.value.iter().filter(|a| a.is_holder()).count())
    }
}
