//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the development server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static file serving settings.
    pub static_files: StaticConfig,

    /// API reverse proxy settings.
    pub proxy: ProxyConfig,

    /// Health endpoint settings.
    pub health: HealthConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

impl ServerConfig {
    /// Port the listener is configured to bind, if the address parses.
    pub fn listen_port(&self) -> Option<u16> {
        self.listener
            .bind_address
            .rsplit(':')
            .next()
            .and_then(|p| p.parse().ok())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Content root directory that URL paths are resolved under.
    pub root: PathBuf,

    /// Default document served for "/".
    pub index: String,

    /// Whether video content types (.mp4) are recognized.
    pub video: bool,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index: "Index.html".to_string(),
            video: true,
        }
    }
}

/// Path-rewrite policy applied when forwarding a matched prefix upstream.
///
/// This is a fixed operator choice; the server never infers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RewritePolicy {
    /// Forward the full path, prefix included (e.g. `/api/widgets` stays
    /// `/api/widgets`).
    #[default]
    Preserve,

    /// Remove the prefix before forwarding (e.g. `/api/widgets` becomes
    /// `/widgets`).
    StripPrefix,
}

/// Reverse proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Enable forwarding of prefixed requests.
    pub enabled: bool,

    /// Path prefix that selects the proxy (e.g. "/api").
    pub prefix: String,

    /// Upstream authority (e.g., "127.0.0.1:8000").
    pub upstream: String,

    /// Path-rewrite policy for forwarded requests.
    pub rewrite: RewritePolicy,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: "/api".to_string(),
            upstream: "127.0.0.1:8000".to_string(),
            rewrite: RewritePolicy::Preserve,
        }
    }
}

/// Health endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Enable the health endpoint.
    pub enabled: bool,

    /// Path the endpoint is served at.
    pub path: String,

    /// Service name reported in the health payload.
    pub service: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/health".to_string(),
            service: "devserver".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}
