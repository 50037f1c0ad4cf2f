//! Gateway Server
//!
//! HTTP server exposing the directory lookup endpoint. Self-contained with
//! dependency injection: the dispatcher (and through it the ticket validator,
//! service registry and directory sources) is constructed by the embedding
//! binary and handed in.

mod classify;
mod handlers;

pub use classify::{error_body, status_for};
pub use handlers::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dispatch::RequestDispatcher;

/// Gateway server configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS for browser access
    pub enable_cors: bool,
    /// Include full error cause chains in responses
    pub debug_errors: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8089,
            enable_cors: true,
            debug_errors: false,
        }
    }
}

impl GatewayConfig {
    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid address")
    }
}

/// Directory gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    dispatcher: Arc<RequestDispatcher>,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, dispatcher: RequestDispatcher) -> Self {
        Self {
            config,
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Build the Axum router
    pub fn build_router(&self) -> Router {
        let app_state = AppState {
            dispatcher: self.dispatcher.clone(),
            debug_errors: self.config.debug_errors,
        };

        let mut router = Router::new()
            .route("/", get(handlers::directory))
            .route("/health", get(handlers::health))
            .with_state(app_state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Run the gateway server
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.addr();

        info!("[Gateway] Starting on {}", addr);
        info!(
            "[Gateway] CORS: {}",
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );
        if self.config.debug_errors {
            info!("[Gateway] Debug error bodies: enabled");
        }

        let router = self.build_router();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("[Gateway] Ready to accept connections");

        axum::serve(listener, router).await?;

        Ok(())
    }

    /// Start the server in the background
    ///
    /// Returns a JoinHandle that can be used to wait for completion or abort.
    pub fn spawn(self) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}
