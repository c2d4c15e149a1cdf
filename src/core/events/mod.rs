//! Event ingestion and fan-out
//!
//! The pipeline: an inbound chainhook payload is parsed into typed blocks
//! and transactions, the extractor normalizes them into [`LottoEvent`]s,
//! each event is appended to the bounded in-memory [`EventStore`] and
//! immediately handed to the [`Broadcaster`] for WebSocket fan-out.

pub mod broadcaster;
pub mod extractor;
pub mod payload;
pub mod store;
pub mod types;

pub use broadcaster::{Broadcaster, REPLAY_LIMIT};
pub use extractor::{extract_events, CategorySource};
pub use payload::ChainhookPayload;
pub use store::{EventStore, RECENT_HARD_CAP, STORE_CAPACITY};
pub use types::{EventKind, LottoEvent, SocketMessage};
