//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (timeout, CORS, request ID, tracing)
//! - Own the shared client handles injected into handlers
//! - Serve until shutdown is triggered

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::http::handlers;
use crate::ledger::client::LedgerClient;
use crate::model::client::ModelClient;

/// Application state injected into handlers.
///
/// The client handles are created once at startup and shared read-only
/// across requests; handlers never mutate them.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<LedgerClient>,
    pub model: Arc<ModelClient>,
}

/// UUID v4 request ID generator.
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let ledger = Arc::new(LedgerClient::new(config.node.clone()));
        let model = Arc::new(ModelClient::new(config.model.clone()));
        Self::with_clients(config, ledger, model)
    }

    /// Create a server around pre-built client handles.
    pub fn with_clients(
        config: RelayConfig,
        ledger: Arc<LedgerClient>,
        model: Arc<ModelClient>,
    ) -> Self {
        let state = AppState { ledger, model };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/api/audit", post(handlers::audit))
            .route("/api/simulate", post(handlers::simulate))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(CorsLayer::permissive())
            .layer(SetRequestIdLayer::x_request_id(XRequestId))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
