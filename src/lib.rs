//! # StacksLotto Relay
//!
//! Event relay backend for the StacksLotto lottery. The relay ingests
//! chainhook notifications from a Stacks blockchain event provider,
//! normalizes them into lottery events, keeps a bounded in-memory feed,
//! and fans new events out to WebSocket subscribers in real time.
//!
//! ## Features
//!
//! - **Webhook ingestion**: per-endpoint and consolidated chainhook
//!   deliveries with optional shared-secret auth
//! - **Bounded event feed**: newest-first in-memory store, never persisted
//! - **WebSocket fan-out**: replay on connect, push on every new event
//! - **Hook registration**: reconciles provider-side chainhook
//!   subscriptions against the desired set at startup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stackslotto_relay::server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     server::run_server().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{RelayError, Result};

pub use core::chainhooks::{ChainhookApi, HookRegistrar, ReconcileSummary};
pub use core::events::{Broadcaster, EventKind, EventStore, LottoEvent, SocketMessage};
pub use server::{run_server, AppState, HttpServer};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
