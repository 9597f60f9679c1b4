//! Outbound path construction.
//!
//! # Responsibilities
//! - Decide whether a request path is proxy traffic (prefix match)
//! - Apply the configured rewrite policy to the forwarded path
//!
//! # Design Decisions
//! - The policy is a fixed configuration choice, never inferred per request
//! - Query strings survive both policies untouched
//! - Stripping the whole path yields "/" rather than an empty target

use crate::config::RewritePolicy;

/// Returns true if the request path should be forwarded upstream.
///
/// `/api` matches `/api` itself and anything under `/api/`, but not
/// `/apiary`.
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Build the outbound path-and-query string for a matched request.
pub fn rewrite_path(path: &str, query: Option<&str>, prefix: &str, policy: RewritePolicy) -> String {
    let rewritten = match policy {
        RewritePolicy::Preserve => path,
        RewritePolicy::StripPrefix => {
            let rest = path.strip_prefix(prefix).unwrap_or(path);
            if rest.is_empty() {
                "/"
            } else {
                rest
            }
        }
    };

    match query {
        Some(q) => format!("{rewritten}?{q}"),
        None => rewritten.to_string(),
    }
}
