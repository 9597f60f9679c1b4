//! Static file serving subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (no proxy prefix match)
//!     → resolver.rs ("/" → index document, join onto content root)
//!     → content_type.rs (extension lookup)
//!     → tokio::fs read → 200 / 404 "File not found" / 500 "Server error"
//! ```

pub mod content_type;
pub mod resolver;

pub use resolver::serve;
