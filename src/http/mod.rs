//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → cors.rs (preflight answers, header injection)
//!     → [proxy | health | static_files] produce the response
//! ```

pub mod cors;
pub mod server;

pub use server::{AppState, HttpServer};
