use crate::{
    allowlist::MethodAllowList,
    error::RelayError,
    limiter::RateLimiter,
    models::jsonrpc::method_of,
    relay::RelayClient,
};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::IpAddr;
use tracing::{debug, error, info, warn};

/// Shared per-process state handed to every handler
///
/// One relay client, one allow-list, and one limiter serve all routes; none
/// of them holds per-request state.
pub struct AppState {
    pub relay: RelayClient,
    pub allow_list: MethodAllowList,
    pub limiter: RateLimiter,
}

/// Query parameters accepted by the holders endpoint
#[derive(Debug, Deserialize)]
struct HoldersQuery {
    mint: Option<String>,
}

/// Response body of the holders endpoint
#[derive(Debug, Serialize)]
struct HoldersResponse {
    holders: usize,
}

/// Main proxy route: forward a JSON-RPC envelope to the upstream provider
///
/// The body passes through opaque except for the allow-list check on its
/// `method` field. RPC-level errors in the upstream's reply are relayed
/// untouched with status 200; only transport failures become proxy errors.
#[post("/")]
async fn relay_rpc(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, RelayError> {
    check_rate_limit(&req, &state)?;

    let method = method_of(&body);
    debug!(
        "Received RPC request for method {} from {}",
        method.unwrap_or("<none>"),
        caller_label(&req),
    );

    if !state.allow_list.allows(method) {
        let method = method.unwrap_or("<none>").to_string();
        warn!("Rejected disallowed RPC method: {}", method);
        return Err(RelayError::MethodNotAllowed(method));
    }

    match state.relay.forward_rpc(&body).await {
        Ok(upstream_body) => Ok(HttpResponse::Ok().json(upstream_body)),
        Err(e) => {
            error!("Proxy error: {}", e);
            Err(e)
        }
    }
}

/// Token metadata lookup, relayed from the configured provider
#[get("/token-info")]
async fn token_info(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, RelayError> {
    check_rate_limit(&req, &state)?;

    match state.relay.fetch_token_info().await {
        Ok(info) => Ok(HttpResponse::Ok().json(info)),
        Err(e) => {
            error!("Token info error: {}", e);
            Err(e)
        }
    }
}

/// Holder count for a mint, computed from on-chain token-account balances
#[get("/holders")]
async fn holders(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<HoldersQuery>,
) -> Result<HttpResponse, RelayError> {
    check_rate_limit(&req, &state)?;

    let mint = query.mint.as_deref().ok_or(RelayError::MissingMint)?;

    match state.relay.count_holders(mint).await {
        Ok(count) => {
            info!("Mint {} has {} holders", mint, count);
            Ok(HttpResponse::Ok().json(HoldersResponse { holders: count }))
        }
        Err(e) => {
            error!("Holder lookup error for mint {}: {}", mint, e);
            Err(e)
        }
    }
}

/// Configure the API routes for the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(relay_rpc)
       .service(token_info)
       .service(holders);
}

/// Enforce the fixed-window budget for the calling IP
///
/// Applies to every route; over-limit requests are rejected before any
/// forwarding happens. A request with no resolvable peer address (only
/// possible in unusual transports) is counted under the unspecified address.
fn check_rate_limit(req: &HttpRequest, state: &AppState) -> Result<(), RelayError> {
    let ip = caller_ip(req);
    if state.limiter.check(ip) {
        Ok(())
    } else {
        warn!("Rate limit exceeded for {}", ip);
        Err(RelayError::RateLimited(ip.to_string()))
    }
}

fn caller_ip(req: &HttpRequest) -> IpAddr {
    req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::from([0, 0, 0, 0]))
}

fn caller_label(req: &HttpRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
