use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Service-specific error types
///
/// This enum defines all possible errors the relay proxy can surface to a
/// caller. Each variant carries internal detail for logging; the client only
/// ever sees the fixed message for that variant.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Inbound RPC method is absent from the configured allow-list
    #[error("RPC method not allowed: {0}")]
    MethodNotAllowed(String),

    /// `/holders` was called without the required `mint` query parameter
    #[error("missing 'mint' query parameter")]
    MissingMint,

    /// Caller exceeded its fixed-window request budget
    #[error("rate limit exceeded for {0}")]
    RateLimited(String),

    /// Transport failure or non-JSON body from the upstream RPC provider
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// Transport failure or non-JSON body from the metadata provider
    #[error("token info fetch failed: {0}")]
    TokenInfo(String),

    /// Holder lookup failed or returned an unusable result shape
    #[error("holder lookup failed: {0}")]
    Holders(String),
}

/// Structured error response for the API
///
/// Every error route returns this single-field JSON body with a fixed,
/// static message; internal detail stays in the server-side logs.
#[derive(Serialize)]
struct ErrorResponse {
    /// Fixed, human-readable error message
    error: &'static str,
}

impl RelayError {
    /// The fixed message exposed to the caller for this error kind
    fn client_message(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed(_) => "RPC method not allowed.",
            RelayError::MissingMint => "Missing 'mint' query parameter",
            RelayError::RateLimited(_) => "Too many requests",
            RelayError::Upstream(_) => "Proxy failed",
            RelayError::TokenInfo(_) => "Failed to fetch token info",
            RelayError::Holders(_) => "Failed to fetch holders",
        }
    }
}

impl ResponseError for RelayError {
    /// Convert the error to an HTTP response
    ///
    /// This method generates the response for the error kind: the appropriate
    /// status code plus the fixed JSON error body. Upstream detail is never
    /// included in the payload.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.client_message(),
        })
    }

    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match *self {
            RelayError::MethodNotAllowed(_) => StatusCode::FORBIDDEN,
            RelayError::MissingMint => StatusCode::BAD_REQUEST,
            RelayError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::TokenInfo(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Holders(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
