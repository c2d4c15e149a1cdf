//! Configuration models

pub mod chainhook;
pub mod server;
pub mod webhook;

pub use chainhook::{ChainhookConfig, HookStrategy, StacksNetwork};
pub use server::ServerConfig;
pub use webhook::WebhookConfig;
