use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 request structure
///
/// This structure represents a standard JSON-RPC request with generic parameters.
/// It is used for building the outbound calls the proxy issues on its own
/// behalf (holder counting); relayed client bodies are forwarded as opaque JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcRequest<T> {
    /// JSON-RPC protocol version (should be "2.0")
    pub jsonrpc: String,

    /// Method name to call
    pub method: String,

    /// Method parameters
    pub params: T,

    /// Request identifier
    pub id: Value,
}

impl<T> JsonRpcRequest<T> {
    /// Create a new JSON-RPC 2.0 request for the given method and parameters
    pub fn new(method: &str, params: T) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Value::from(1),
        }
    }
}

/// JSON-RPC 2.0 response envelope with a typed result
///
/// A well-formed response carries exactly one of `result` and `error`, but the
/// proxy never relies on the upstream being well-formed.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    /// Method result, absent when the call failed at the RPC level
    pub result: Option<T>,

    /// RPC-level error payload, if any
    #[serde(default)]
    pub error: Option<Value>,
}

/// Result shape of a `getTokenLargestAccounts` call
///
/// The upstream wraps the account list in a `value` field alongside a
/// `context` object the proxy does not need.
#[derive(Debug, Deserialize)]
pub struct TokenLargestAccounts {
    /// Token accounts holding the queried mint, largest first
    pub value: Vec<TokenAccountBalance>,
}

/// A single token-account balance entry
#[derive(Debug, Deserialize)]
pub struct TokenAccountBalance {
    /// Parsed token amount, `null` when the upstream could not compute it
    #[serde(rename = "uiAmount")]
    pub ui_amount: Option<f64>,
}

impl TokenAccountBalance {
    /// Whether this account counts as a holder (strictly positive balance)
    pub fn is_holder(&self) -> bool {
        self.ui_amount.map_or(false, |amount| amount > 0.0)
    }
}

/// Extract the `method` field from an inbound RPC envelope, if present and a string
pub fn method_of(body: &Value) -> Option<&str> {
    body.get("method").and_then(Value::as_str)
}
