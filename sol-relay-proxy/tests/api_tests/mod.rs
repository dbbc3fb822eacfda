//! Integration tests for the API endpoints

use actix_web::{http::StatusCode, test, App};
use serde_json::json;

use sol_relay_proxy::api;

use helpers::{build_state, build_state_with_limit, spawn_upstream, unreachable_url};

#[actix_web::test]
async fn test_disallowed_method_rejected() {
    let upstream = spawn_upstream(json!({"jsonrpc": "2.0", "result": null, "id": 1}));

    let app = test::init_service(
        App::new()
            .app_data(build_state(&upstream.url))
            .configure(api::configure),
    )
    .await;

    // sendTransaction is not in the default allow-list.
    let request = json!({
        "jsonrpc": "2.0",
        "method": "sendTransaction",
        "params": [],
        "id": 1
    });

    let req = test::TestRequest::post()
        .uri("/")
        .set_json(&request)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body = test::read_body(resp).await;
    let response: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse JSON response");
    assert_eq!(response, json!({"error": "RPC method not allowed."}));

    // The rejection happens before any forwarding.
    assert_eq!(upstream.recorder.call_count(), 0);
}

#[actix_web::test]
async fn test_missing_method_rejected() {
    let upstream = spawn_upstream(json!({"jsonrpc": "2.0", "result": null, "id": 1}));

    let app = test::init_service(
        App::new()
            .app_data(build_state(&upstream.url))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/")
        .set_json(&json!({"jsonrpc": "2.0", "id": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(upstream.recorder.call_count(), 0);
}

#[actix_web::test]
async fn test_allowed_method_relayed() {
    let upstream_reply = json!({
        "jsonrpc": "2.0",
        "result": {"value": 123456789u64},
        "id": 42
    });
    let upstream = spawn_upstream(upstream_reply.clone());

    let app = test::init_service(
        App::new()
            .app_data(build_state(&upstream.url))
            .configure(api::configure),
    )
    .await;

    let request = json!({
        "jsonrpc": "2.0",
        "method": "getBalance",
        "params": ["83astBRguLMdt2h5U1Tpdq5tjFoJ6noeGwaY3mDLVcri"],
        "id": 42
    });

    let req = test::TestRequest::post()
        .uri("/")
        .set_json(&request)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    // Upstream body is relayed untouched.
    let body = test::read_body(resp).await;
    let response: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse JSON response");
    assert_eq!(response, upstream_reply);

    // Upstream saw exactly the inbound envelope, one call.
    assert_eq!(upstream.recorder.call_count(), 1);
    assert_eq!(upstream.recorder.last_body(), Some(request));
}

#[actix_web::test]
async fn test_rpc_level_error_is_passed_through() {
    let upstream_reply = json!({
        "jsonrpc": "2.0",
        "error": {"code": -32601, "message": "Method not found"},
        "id": 7
    });
    let upstream = spawn_upstream(upstream_reply.clone());

    let app = test::init_service(
        App::new()
            .app_data(build_state(&upstream.url))
            .configure(api::configure),
    )
    .await;

    let request = json!({
        "jsonrpc": "2.0",
        "method": "getAccountInfo",
        "params": [],
        "id": 7
    });

    let req = test::TestRequest::post()
        .uri("/")
        .set_json(&request)
        .to_request();
    let resp = test::call_service(&app, req).await;

    // An RPC-level error is still a successful relay.
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let response: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse JSON response");
    assert_eq!(response, upstream_reply);
}

#[actix_web::test]
async fn test_unreachable_upstream_yields_proxy_failed() {
    let app = test::init_service(
        App::new()
            .app_data(build_state(&unreachable_url()))
            .configure(api::configure),
    )
    .await;

    let request = json!({
        "jsonrpc": "2.0",
        "method": "getBalance",
        "params": [],
        "id": 1
    });

    let req = test::TestRequest::post()
        .uri("/")
        .set_json(&request)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = test::read_body(resp).await;
    let response: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse JSON response");
    assert_eq!(response, json!({"error": "Proxy failed"}));
}

#[actix_web::test]
async fn test_rate_limit_rejects_after_budget() {
    let upstream = spawn_upstream(json!({"jsonrpc": "2.0", "result": null, "id": 1}));

    let app = test::init_service(
        App::new()
            .app_data(build_state_with_limit(&upstream.url, 100))
            .configure(api::configure),
    )
    .await;

    let request = json!({
        "jsonrpc": "2.0",
        "method": "getBalance",
        "params": [],
        "id": 1
    });
    let peer = "10.1.2.3:5000".parse().unwrap();

    // The full budget goes through.
    for _ in 0..100 {
        let req = test::TestRequest::post()
            .uri("/")
            .peer_addr(peer)
            .set_json(&request)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // Request 101 in the same window is rejected before forwarding.
    let req = test::TestRequest::post()
        .uri("/")
        .peer_addr(peer)
        .set_json(&request)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = test::read_body(resp).await;
    let response: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse JSON response");
    assert_eq!(response, json!({"error": "Too many requests"}));

    assert_eq!(upstream.recorder.call_count(), 100);
}

#[actix_web::test]
async fn test_token_info_relayed() {
    let metadata = json!({
        "pairs": [{"priceUsd": "0.0042", "liquidity": {"usd": 12345.0}}]
    });
    let upstream = spawn_upstream(metadata.clone());

    let app = test::init_service(
        App::new()
            .app_data(build_state(&upstream.url))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/token-info").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let response: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse JSON response");
    assert_eq!(response, metadata);
}

#[actix_web::test]
async fn test_token_info_failure_yields_fixed_error() {
    let app = test::init_service(
        App::new()
            .app_data(build_state(&unreachable_url()))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/token-info").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = test::read_body(resp).await;
    let response: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse JSON response");
    assert_eq!(response, json!({"error": "Failed to fetch token info"}));
}

#[actix_web::test]
async fn test_holders_counts_positive_balances_only() {
    // Three accounts: zero balance, positive balance, unparsed balance.
    let upstream = spawn_upstream(json!({
        "jsonrpc": "2.0",
        "result": {
            "context": {"slot": 123},
            "value": [
                {"address": "acc1", "amount": "0", "decimals": 6, "uiAmount": 0.0, "uiAmountString": "0"},
                {"address": "acc2", "amount": "5000000", "decimals": 6, "uiAmount": 5.0, "uiAmountString": "5"},
                {"address": "acc3", "amount": "1", "decimals": 6, "uiAmount": null, "uiAmountString": "0.000001"}
            ]
        },
        "id": 1
    }));

    let app = test::init_service(
        App::new()
            .app_data(build_state(&upstream.url))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/holders?mint=9AtC4cXKs7XUGCsoxPcEuMeig68MJwHpn6LXQCgF19DY")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let response: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse JSON response");
    assert_eq!(response, json!({"holders": 1}));

    // The lookup went to the upstream RPC with the fixed method.
    let forwarded = upstream.recorder.last_body().expect("No upstream call recorded");
    assert_eq!(forwarded["method"], "getTokenLargestAccounts");
    assert_eq!(forwarded["params"][0], "9AtC4cXKs7XUGCsoxPcEuMeig68MJwHpn6LXQCgF19DY");
}

#[actix_web::test]
async fn test_holders_missing_mint_is_client_error() {
    let upstream = spawn_upstream(json!({"jsonrpc": "2.0", "result": null, "id": 1}));

    let app = test::init_service(
        App::new()
            .app_data(build_state(&upstream.url))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/holders").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    let response: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse JSON response");
    assert_eq!(response, json!({"error": "Missing 'mint' query parameter"}));

    assert_eq!(upstream.recorder.call_count(), 0);
}

#[actix_web::test]
async fn test_holders_malformed_result_is_server_error() {
    // Result lacks the expected token-account list shape.
    let upstream = spawn_upstream(json!({"jsonrpc": "2.0", "result": "nonsense", "id": 1}));

    let app = test::init_service(
        App::new()
            .app_data(build_state(&upstream.url))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/holders?mint=someMint").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = test::read_body(resp).await;
    let response: serde_json::Value =
        serde_json::from_slice(&body).expect("Failed to parse JSON response");
    assert_eq!(response, json!({"error": "Failed to fetch holders"}));
}
