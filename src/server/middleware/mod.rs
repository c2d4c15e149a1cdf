//! Middleware for the relay server

pub mod auth;

pub use auth::WebhookAuth;
