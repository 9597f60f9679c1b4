//! Local Development HTTP Server Library

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod proxy;
pub mod static_files;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
