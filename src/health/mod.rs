//! Health endpoint.
//!
//! The front-facing deployment exposes a small status payload so operators
//! and load balancers can confirm the process is up. Status is always "ok";
//! a process that can answer at all is healthy.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;

use crate::config::ServerConfig;
use crate::http::cors;

/// Payload returned by the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
    pub port: Option<u16>,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn current(config: &ServerConfig) -> Self {
        Self {
            status: "ok",
            service: config.health.service.clone(),
            port: config.listen_port(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Build the health response for the current process state.
pub fn respond(config: &ServerConfig) -> Response {
    let status = HealthStatus::current(config);
    let body = serde_json::to_string(&status).unwrap_or_else(|_| r#"{"status":"ok"}"#.to_string());

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::OK;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    cors::apply_full(response.headers_mut());
    response
}
