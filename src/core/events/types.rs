//! Event type definitions
//!
//! This module contains the canonical event record, its category tag and
//! the WebSocket message envelope.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Event category
///
/// Closed set of lottery categories plus a passthrough `Tag` for
/// per-endpoint ingestion, where the path segment names the category
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Single ticket bought
    TicketPurchase,
    /// Multiple tickets bought in one call
    BulkTickets,
    /// Winner drawn for a round
    WinnerDrawn,
    /// Lottery paused by the operator
    LotteryPaused,
    /// Lottery resumed by the operator
    LotteryResumed,
    /// Passthrough per-endpoint tag
    Tag(String),
}

impl EventKind {
    /// Map a contract function name to a category.
    ///
    /// Returns `None` for unrecognized functions; the consolidated ingestion
    /// path drops those transactions entirely.
    pub fn from_function_name(name: &str) -> Option<Self> {
        match name {
            "buy-ticket" | "quick-play" => Some(EventKind::TicketPurchase),
            "buy-tickets" | "lucky-five" | "power-play" | "mega-play" => {
                Some(EventKind::BulkTickets)
            }
            "draw-winner" => Some(EventKind::WinnerDrawn),
            "pause-lottery" => Some(EventKind::LotteryPaused),
            "resume-lottery" => Some(EventKind::LotteryResumed),
            _ => None,
        }
    }

    /// Build a category from a per-endpoint path tag.
    ///
    /// Known category names map to their variants; anything else is carried
    /// through as-is.
    pub fn from_path_tag(tag: &str) -> Self {
        match tag {
            "ticket-purchase" => EventKind::TicketPurchase,
            "bulk-tickets" => EventKind::BulkTickets,
            "winner-drawn" => EventKind::WinnerDrawn,
            "lottery-paused" => EventKind::LotteryPaused,
            "lottery-resumed" => EventKind::LotteryResumed,
            other => EventKind::Tag(other.to_string()),
        }
    }

    /// Wire name of the category
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::TicketPurchase => "ticket-purchase",
            EventKind::BulkTickets => "bulk-tickets",
            EventKind::WinnerDrawn => "winner-drawn",
            EventKind::LotteryPaused => "lottery-paused",
            EventKind::LotteryResumed => "lottery-resumed",
            EventKind::Tag(tag) => tag,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Err(D::Error::custom("event kind cannot be empty"));
        }
        Ok(EventKind::from_path_tag(&raw))
    }
}

/// Canonical lottery event
///
/// Optional fields are populated only when present in the source payload;
/// absence is omitted from the wire format rather than defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LottoEvent {
    /// Transaction hash plus a process-local sequence disambiguator
    pub id: String,
    /// Event category
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Buying or playing principal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    /// Lottery round number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u64>,
    /// Number of tickets involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_count: Option<u64>,
    /// Winning principal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// Prize amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<u64>,
    /// Underlying transaction identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Height of the block the transaction confirmed in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    /// Ingestion-time wall clock, not chain time
    pub timestamp: DateTime<Utc>,
}

/// Messages pushed to WebSocket subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SocketMessage {
    /// Initial replay sent once on connect, newest first
    Connected { events: Vec<LottoEvent> },
    /// Live push per ingested event
    NewEvent { event: LottoEvent },
}
