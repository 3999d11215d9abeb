//! Sentinel Relay (v1)
//!
//! An AI-assisted auditing relay built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────────┐
//!                    │                  SENTINEL RELAY                     │
//!                    │                                                     │
//!   POST /api/audit  │  ┌─────────┐    ┌──────────┐    ┌──────────────┐   │
//!   ─────────────────┼─▶│  http   │───▶│ resolver │───▶│    ledger    │───┼──▶ Fullnode
//!                    │  │ server  │    │          │◀───│    client    │◀──┼──  REST API
//!                    │  └─────────┘    └────┬─────┘    └──────────────┘   │
//!                    │                      │                             │
//!                    │                      ▼                             │
//!   JSON verdict     │  ┌─────────┐    ┌──────────┐    ┌──────────────┐   │
//!   ◀────────────────┼──│ verdict │◀───│ analysis │───▶│    model     │───┼──▶ Completion
//!                    │  │  parse  │    │dispatcher│    │    client    │◀──┼──  Service
//!                    │  └─────────┘    └──────────┘    └──────────────┘   │
//!                    │                                                     │
//!                    │  ┌────────────────────────────────────────────────┐ │
//!                    │  │            Cross-Cutting Concerns               │ │
//!                    │  │   config      lifecycle       observability     │ │
//!                    │  │  (TOML+env)  (shutdown)      (tracing)          │ │
//!                    │  └────────────────────────────────────────────────┘ │
//!                    └────────────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sentinel_relay::config::loader;
use sentinel_relay::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentinel_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("sentinel-relay v0.1.0 starting");

    let config = loader::load_or_default()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        node_url = %config.node.base_url,
        model = %config.model.model,
        model_configured = config.model.api_key.is_some(),
        "Configuration loaded"
    );

    if config.model.api_key.is_none() {
        tracing::warn!("No completion credential configured; analysis endpoints return demo output");
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Wire Ctrl+C to the shutdown coordinator
    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
