//! API reverse proxy subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (path under proxy prefix)
//!     → rewrite.rs (apply path-rewrite policy)
//!     → forward.rs (rebuild URI, copy headers, stream body upstream)
//!     → upstream response relayed with CORS headers injected
//! ```

pub mod forward;
pub mod rewrite;

pub use forward::{forward, HttpClient};
pub use rewrite::{matches_prefix, rewrite_path};
