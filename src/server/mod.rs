//! HTTP server implementation
//!
//! This module provides the HTTP server, routing and the WebSocket
//! subscriber channel.

pub mod builder;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod ws;

pub use builder::run_server;
pub use server::HttpServer;
pub use state::AppState;
