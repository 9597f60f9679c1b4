//! Proxy behavior tests: rewrite policies, header handling, upstream failure.

use devserver::config::{RewritePolicy, ServerConfig};
use reqwest::StatusCode;

mod common;

fn proxy_config(upstream: std::net::SocketAddr, rewrite: RewritePolicy) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.proxy.enabled = true;
    config.proxy.prefix = "/api".to_string();
    config.proxy.upstream = upstream.to_string();
    config.proxy.rewrite = rewrite;
    config
}

#[tokio::test]
async fn preserve_policy_keeps_prefix_upstream() {
    let upstream = common::start_echo_upstream().await;
    let (addr, _shutdown) = common::spawn_server(proxy_config(upstream, RewritePolicy::Preserve)).await;

    let res = common::client()
        .get(format!("http://{addr}/api/widgets"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["path"], "/api/widgets");
    assert_eq!(body["method"], "GET");
    assert_eq!(
        body["host"],
        upstream.to_string(),
        "Host header must be overridden to the upstream address"
    );
}

#[tokio::test]
async fn strip_policy_removes_prefix_upstream() {
    let upstream = common::start_echo_upstream().await;
    let (addr, _shutdown) =
        common::spawn_server(proxy_config(upstream, RewritePolicy::StripPrefix)).await;

    let res = common::client()
        .get(format!("http://{addr}/api/widgets"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["path"], "/widgets");
}

#[tokio::test]
async fn query_string_is_forwarded() {
    let upstream = common::start_echo_upstream().await;
    let (addr, _shutdown) =
        common::spawn_server(proxy_config(upstream, RewritePolicy::StripPrefix)).await;

    let res = common::client()
        .get(format!("http://{addr}/api/search?q=fan&page=2"))
        .send()
        .await
        .unwrap();

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["path"], "/search");
    assert_eq!(body["query"], "q=fan&page=2");
}

#[tokio::test]
async fn post_bodies_reach_the_upstream() {
    let upstream = common::start_echo_upstream().await;
    let (addr, _shutdown) = common::spawn_server(proxy_config(upstream, RewritePolicy::Preserve)).await;

    let payload = vec![b'x'; 64 * 1024];
    let res = common::client()
        .post(format!("http://{addr}/api/upload"))
        .body(payload)
        .send()
        .await
        .unwrap();

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["method"], "POST");
    assert_eq!(body["body_bytes"], 64 * 1024);
}

#[tokio::test]
async fn large_upload_streams_through() {
    let upstream = common::start_echo_upstream().await;
    let (addr, _shutdown) = common::spawn_server(proxy_config(upstream, RewritePolicy::Preserve)).await;

    // 32 MiB delivered as a chunked stream; the proxy must relay it without
    // collecting the whole payload.
    const CHUNK: usize = 64 * 1024;
    const CHUNKS: usize = 512;
    let stream = futures_util::stream::iter(
        (0..CHUNKS).map(|_| Ok::<_, std::io::Error>(vec![b'y'; CHUNK])),
    );

    let res = common::client()
        .post(format!("http://{addr}/api/bulk"))
        .body(reqwest::Body::wrap_stream(stream))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["body_bytes"], (CHUNK * CHUNKS) as u64);
}

#[tokio::test]
async fn unreachable_upstream_yields_json_error() {
    // Nothing listens on this address; connection is refused immediately.
    let upstream: std::net::SocketAddr = "127.0.0.1:1".parse().unwrap();
    let (addr, _shutdown) = common::spawn_server(proxy_config(upstream, RewritePolicy::Preserve)).await;

    let res = common::client()
        .get(format!("http://{addr}/api/widgets"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.headers()["content-type"],
        "application/json",
        "error must be JSON"
    );
    assert_eq!(res.headers()["access-control-allow-origin"], "*");

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "API service unavailable");
    assert!(
        body["message"].as_str().is_some_and(|m| !m.is_empty()),
        "message should describe the transport error"
    );
}

#[tokio::test]
async fn upstream_response_gains_cors_headers() {
    let upstream = common::start_echo_upstream().await;
    let (addr, _shutdown) = common::spawn_server(proxy_config(upstream, RewritePolicy::Preserve)).await;

    let res = common::client()
        .get(format!("http://{addr}/api/widgets"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        res.headers()["access-control-allow-methods"],
        "GET, POST, OPTIONS"
    );
    assert_eq!(res.headers()["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn disabled_proxy_falls_through_to_static() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ServerConfig::default();
    config.proxy.enabled = false;
    config.static_files.root = dir.path().to_path_buf();
    let (addr, _shutdown) = common::spawn_server(config).await;

    let res = common::client()
        .get(format!("http://{addr}/api/widgets"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "File not found");
}
