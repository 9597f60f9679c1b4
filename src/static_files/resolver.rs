//! URL path to file resolution and serving.
//!
//! # Responsibilities
//! - Map "/" to the configured default document
//! - Join the URL path onto the content root
//! - Refuse path components that would escape the root
//! - Translate read errors into the 404/500 contract
//!
//! # Design Decisions
//! - The request path is treated as a URL path, never a filesystem path,
//!   until it is percent-decoded and explicitly joined onto the root
//! - Traversal attempts (including encoded ones) answer 404,
//!   indistinguishable from a missing file
//! - Files are read fully; only proxy bodies need bounded streaming

use std::path::{Component, Path, PathBuf};

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;

use crate::config::StaticConfig;
use crate::http::cors;
use crate::static_files::content_type;

/// Serve the file the URL path resolves to under the content root.
pub async fn serve(config: &StaticConfig, url_path: &str) -> Response {
    let Some(file_path) = resolve_path(config, url_path) else {
        return not_found();
    };

    let content_type = content_type::for_extension(
        file_path.extension().and_then(|e| e.to_str()),
        config.video,
    );

    match tokio::fs::read(&file_path).await {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(content_type),
            );
            cors::apply_full(response.headers_mut());
            response
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => not_found(),
        Err(e) => {
            tracing::error!(path = %file_path.display(), error = %e, "Failed to read static file");
            plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

/// Resolve a URL path to a file path under the root, or `None` if the path
/// tries to step outside it.
///
/// Percent-escapes are decoded first, so `/my%20file.html` finds
/// `my file.html`; the traversal check runs on the decoded result.
fn resolve_path(config: &StaticConfig, url_path: &str) -> Option<PathBuf> {
    let relative = url_path.trim_start_matches('/');
    // Escapes that decode to invalid UTF-8 cannot name a file we serve
    let decoded = urlencoding::decode(relative).ok()?;
    let relative = if decoded.is_empty() {
        config.index.as_str()
    } else {
        decoded.as_ref()
    };

    let mut resolved = config.root.clone();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            // "." and ".." (and any absolute component) are not valid in a
            // URL path under the content root
            _ => return None,
        }
    }
    Some(resolved)
}

fn not_found() -> Response {
    plain_text(StatusCode::NOT_FOUND, "File not found")
}

fn plain_text(status: StatusCode, body: &'static str) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    cors::apply_origin(response.headers_mut());
    response
}
