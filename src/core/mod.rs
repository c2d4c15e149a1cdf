//! Core relay functionality

pub mod chainhooks;
pub mod events;
