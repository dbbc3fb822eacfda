use eyre::{eyre, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// DexScreener token-pairs lookup for the project mint, relayed by `/token-info`
const DEFAULT_TOKEN_INFO_URL: &str =
    "https://api.dexscreener.com/latest/dex/tokens/9AtC4cXKs7XUGCsoxPcEuMeig68MJwHpn6LXQCgF19DY";

/// Service configuration structure
///
/// This structure contains all the configuration parameters for the relay
/// proxy. It handles loading values from environment variables with
/// appropriate defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Host address to bind the server to (default: 127.0.0.1)
    pub host: String,

    /// Port to listen on (default: 3000)
    pub port: u16,

    /// Upstream Solana JSON-RPC endpoint URL (required)
    pub rpc_url: String,

    /// Allow-list of RPC method names; `None` disables enforcement
    pub allowed_methods: Option<Vec<String>>,

    /// External metadata endpoint relayed by `/token-info`
    pub token_info_url: String,

    /// Requests allowed per caller per rate-limit window (default: 100)
    pub rate_limit_max: u32,

    /// Length of the rate-limit window (default: 60s)
    pub rate_limit_window: Duration,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This method reads configuration from environment variables, using
    /// default values when variables are not defined. `SOLANA_RPC_URL` has no
    /// default: a relay with no upstream is a misconfiguration, so startup
    /// fails rather than forwarding to an undefined destination.
    ///
    /// # Environment Variables
    ///
    /// * `HOST` - Server host address (default: "127.0.0.1")
    /// * `PORT` - Server port (default: 3000)
    /// * `SOLANA_RPC_URL` - Upstream Solana RPC URL (required)
    /// * `ALLOWED_RPC_METHODS` - Comma-separated allow-list; `*` disables
    ///   enforcement; unset keeps the built-in default list
    /// * `TOKEN_INFO_URL` - Metadata endpoint for `/token-info`
    /// * `RATE_LIMIT_MAX` - Requests per window per IP (default: 100)
    /// * `RATE_LIMIT_WINDOW_SECS` - Window length in seconds (default: 60)
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()?,
            rpc_url: env::var("SOLANA_RPC_URL")
                .map_err(|_| eyre!("SOLANA_RPC_URL must be set"))?,
            allowed_methods: parse_allowed_methods(env::var("ALLOWED_RPC_METHODS").ok()),
            token_info_url: env::var("TOKEN_INFO_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_INFO_URL.to_string()),
            rate_limit_max: env::var("RATE_LIMIT_MAX")
                .unwrap_or_else(|_| "100".to_string())
                .parse::<u32>()?,
            rate_limit_window: Duration::from_secs(
                env::var("RATE_LIMIT_WINDOW_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse::<u64>()?,
            ),
        })
    }
}

/// Interpret the `ALLOWED_RPC_METHODS` value
///
/// Unset keeps the built-in default list in force. The literal `*` disables
/// enforcement entirely, which callers must request explicitly.
fn parse_allowed_methods(raw: Option<String>) -> Option<Vec<String>> {
    match raw {
        None => Some(
            crate::allowlist::DEFAULT_ALLOWED_METHODS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        ),
        Some(value) if value.trim() == "*" => None,
        Some(value) => Some(
            value
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
        ),
    }
}
