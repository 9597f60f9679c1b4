//! Upstream request forwarding.
//!
//! # Responsibilities
//! - Rewrite the request URI for the configured upstream authority
//! - Copy inbound headers, overriding `Host` with the upstream address
//! - Stream bodies in both directions without buffering
//! - Map connect/transport failures to a JSON error response
//!
//! # Design Decisions
//! - The inbound body is handed to the client untouched, so memory stays
//!   bounded under arbitrarily large uploads
//! - Connection failure is only reported as JSON because it surfaces before
//!   any response bytes were written; a failure after the upstream head was
//!   relayed aborts the connection instead (accepted limitation)
//! - Failed requests are never retried

use axum::body::Body;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{header, HeaderValue, Request, StatusCode, Uri};
use axum::response::Response;
use hyper_util::client::legacy::{connect::HttpConnector, Client};

use crate::config::ProxyConfig;
use crate::http::cors;
use crate::proxy::rewrite::rewrite_path;

/// Shared HTTP client used for all upstream requests.
pub type HttpClient = Client<HttpConnector, Body>;

/// Forward a matched request to the configured upstream and relay the result.
pub async fn forward(
    client: &HttpClient,
    config: &ProxyConfig,
    request: Request<Body>,
) -> Response {
    let (parts, body) = request.into_parts();

    let target = rewrite_path(
        parts.uri.path(),
        parts.uri.query(),
        &config.prefix,
        config.rewrite,
    );

    tracing::info!(
        method = %parts.method,
        path = %parts.uri.path(),
        upstream = %config.upstream,
        target = %target,
        "Proxying API request"
    );

    let uri = match build_upstream_uri(&config.upstream, &target) {
        Ok(uri) => uri,
        Err(message) => {
            tracing::error!(upstream = %config.upstream, error = %message, "Invalid upstream target");
            return upstream_error(&message);
        }
    };

    // The inbound version is deliberately not carried over; the upstream is
    // spoken to over HTTP/1.1 whatever the browser used inbound
    let mut outbound = Request::new(body);
    *outbound.method_mut() = parts.method;
    *outbound.uri_mut() = uri;
    *outbound.headers_mut() = parts.headers;
    if let Ok(host) = HeaderValue::from_str(&config.upstream) {
        outbound.headers_mut().insert(header::HOST, host);
    }

    match client.request(outbound).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            let mut response = Response::from_parts(parts, Body::new(body));
            cors::apply_full(response.headers_mut());
            response
        }
        Err(e) => {
            tracing::error!(upstream = %config.upstream, error = %e, "Upstream request failed");
            upstream_error(&e.to_string())
        }
    }
}

fn build_upstream_uri(upstream: &str, path_and_query: &str) -> Result<Uri, String> {
    let authority: Authority = upstream.parse().map_err(|_| {
        format!("upstream address is not a valid authority: {upstream:?}")
    })?;
    let path_and_query: PathAndQuery = path_and_query.parse().map_err(|_| {
        format!("rewritten path is not a valid target: {path_and_query:?}")
    })?;

    let mut parts = Uri::default().into_parts();
    parts.scheme = Some(Scheme::HTTP);
    parts.authority = Some(authority);
    parts.path_and_query = Some(path_and_query);

    Uri::from_parts(parts).map_err(|e| format!("failed to assemble upstream URI: {e}"))
}

/// 500 JSON response for an upstream that could not be reached.
fn upstream_error(message: &str) -> Response {
    let payload = serde_json::json!({
        "success": false,
        "error": "API service unavailable",
        "message": message,
    });

    let mut response = Response::new(Body::from(payload.to_string()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    cors::apply_origin(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_http_uri_for_upstream() {
        let uri = build_upstream_uri("127.0.0.1:8000", "/api/widgets?page=2").unwrap();
        assert_eq!(uri.to_string(), "http://127.0.0.1:8000/api/widgets?page=2");
    }

    #[test]
    fn rejects_garbage_authority() {
        assert!(build_upstream_uri("not a host", "/").is_err());
    }

    #[test]
    fn error_response_is_json_with_origin_header() {
        let response = upstream_error("connection refused");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
