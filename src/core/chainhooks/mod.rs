//! Chainhook subscription management
//!
//! Reconciles the desired set of provider-side webhook subscriptions
//! ("chainhooks") against what the provider currently has registered.
//! Everything here talks to the provider through the [`ChainhookApi`] seam.

pub mod client;
pub mod registrar;
pub mod types;

pub use client::{ChainhookApi, HttpChainhooksClient};
pub use registrar::{HookRegistrar, ReconcileSummary, HOOK_NAME_PREFIX, PROVIDER_HOOK_LIMIT};
pub use types::{ChainhookDefinition, ChainhookList, ChainhookRecord, HookAction};
