use crate::allowlist::MethodAllowList;
use crate::api::AppState;
use crate::limiter::RateLimiter;
use crate::relay::RelayClient;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

mod allowlist;
mod api;
mod config;
mod error;
mod limiter;
mod models;
mod relay;

/// Application entry point
///
/// This is the main function that:
/// 1. Sets up logging
/// 2. Loads configuration (failing fast when the upstream RPC URL is unset)
/// 3. Builds the relay client, allow-list, and rate limiter
/// 4. Starts the HTTP server with all endpoints
#[actix_web::main] // Actix will build a multithreaded runtime
async fn main() -> std::io::Result<()> {
    // Configure logging with appropriate log levels for different components
    // - Info level for our service
    // - Lower levels for dependencies to reduce noise
    let filter = EnvFilter::from_default_env()
        .add_directive("sol_relay_proxy=info".parse().unwrap())
        .add_directive("actix_web=error".parse().unwrap())
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap());

    // Initialize the tracing subscriber with our filter
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    // Load configuration from environment variables
    let config = config::Config::from_env().expect("Failed to load config");

    // Build the upstream client; the proxy never starts without a valid URL set
    let relay = RelayClient::new(&config.rpc_url, &config.token_info_url)
        .expect("Failed to build relay client");

    let state = web::Data::new(AppState {
        relay,
        allow_list: MethodAllowList::new(config.allowed_methods.clone()),
        limiter: RateLimiter::new(config.rate_limit_max, config.rate_limit_window),
    });

    tracing::info!(
        "Relay proxy listening on {}:{}, forwarding to upstream RPC",
        config.host,
        config.port
    );

    // Create and start HTTP server
    HttpServer::new(move || {
        App::new()
            // Add logging middleware
            .wrap(TracingLogger::default())
            // Register the shared state (relay client, allow-list, limiter)
            .app_data(state.clone())
            // Configure API routes
            .configure(api::configure)
    })
    // Set number of worker threads
    .workers(4)
    // Bind to host/port from configuration
    .bind(format!("{}:{}", config.host, config.port))?
    // Start the server
    .run()
    .await
}
