//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::extract::Request;
use axum::routing::any;
use axum::{Json, Router};
use futures_util::StreamExt;
use tokio::net::TcpListener;

use devserver::{HttpServer, ServerConfig, Shutdown};

/// Spawn the server under test on an ephemeral port.
///
/// The returned `Shutdown` stops the server when triggered (or when dropped
/// at the end of the test, since the task is aborted with the runtime).
pub async fn spawn_server(mut config: ServerConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Start a mock upstream that echoes the method, path, query, and body size
/// of every request it receives as JSON.
///
/// The body is consumed chunk by chunk, so it also works as the sink for
/// large streamed uploads.
#[allow(dead_code)]
pub async fn start_echo_upstream() -> SocketAddr {
    async fn echo(request: Request) -> Json<serde_json::Value> {
        let method = request.method().to_string();
        let path = request.uri().path().to_string();
        let query = request.uri().query().map(str::to_string);
        let host = request
            .headers()
            .get("host")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);

        let mut body_bytes: u64 = 0;
        let mut stream = request.into_body().into_data_stream();
        while let Some(chunk) = stream.next().await {
            body_bytes += chunk.map(|c| c.len() as u64).unwrap_or(0);
        }

        Json(serde_json::json!({
            "method": method,
            "path": path,
            "query": query,
            "host": host,
            "body_bytes": body_bytes,
        }))
    }

    let app = Router::new()
        .route("/", any(echo))
        .route("/{*path}", any(echo));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}

/// Test client that bypasses any local proxy settings.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
