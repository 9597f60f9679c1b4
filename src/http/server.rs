//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the wildcard dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Classify each request: CORS preflight, proxy, health, static file
//!
//! # Design Decisions
//! - One handler, one priority branch; each request is handled statelessly
//! - Preflight wins over everything, proxy prefix over static resolution
//! - The upstream client is built once and shared through AppState

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::Response,
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::health;
use crate::http::cors;
use crate::proxy::{self, HttpClient};
use crate::static_files;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub client: HttpClient,
}

/// HTTP server for the development dispatcher.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let config = Arc::new(config);

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            config: config.clone(),
            client,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            content_root = %self.config.static_files.root.display(),
            "HTTP server starting"
        );
        if self.config.proxy.enabled {
            tracing::info!(
                prefix = %self.config.proxy.prefix,
                upstream = %self.config.proxy.upstream,
                rewrite = ?self.config.proxy.rewrite,
                "API proxy enabled"
            );
        }

        let app = self.router.into_make_service();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Main dispatch handler.
///
/// Priority order: CORS preflight, proxy prefix, health path, static file.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    if request.method() == Method::OPTIONS {
        return cors::preflight();
    }

    let config = &state.config;
    let path = request.uri().path().to_string();

    if config.proxy.enabled && proxy::matches_prefix(&path, &config.proxy.prefix) {
        return proxy::forward(&state.client, &config.proxy, request).await;
    }

    if config.health.enabled && path == config.health.path {
        return health::respond(config);
    }

    static_files::serve(&config.static_files, &path).await
}
