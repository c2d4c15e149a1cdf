//! Event extraction from chainhook payloads
//!
//! Walks forward-applied blocks and normalizes their transactions into
//! [`LottoEvent`]s. Rollback blocks are never visited.

use chrono::Utc;
use tracing::debug;

use super::payload::{ChainhookPayload, Transaction};
use super::types::{EventKind, LottoEvent};

/// How the event category is determined for a delivery
#[derive(Debug, Clone)]
pub enum CategorySource {
    /// Per-endpoint ingestion: every transaction gets the path's category,
    /// regardless of the invoked function
    PathTag(EventKind),
    /// Consolidated ingestion: the invoked function name is mapped through
    /// the fixed category table; unmapped functions yield no event
    FunctionMap,
}

/// Extract normalized events from a payload.
///
/// `next_seq` supplies the process-local disambiguator for event ids. The
/// two ingestion paths deliberately differ: the per-endpoint path tags every
/// transaction, the consolidated path drops transactions whose function is
/// not in the table.
pub fn extract_events(
    payload: &ChainhookPayload,
    source: &CategorySource,
    mut next_seq: impl FnMut() -> u64,
) -> Vec<LottoEvent> {
    let mut events = Vec::new();

    for block in &payload.apply {
        let block_height = block.block_identifier.as_ref().and_then(|b| b.index);

        for tx in &block.transactions {
            let kind = match source {
                CategorySource::PathTag(kind) => kind.clone(),
                CategorySource::FunctionMap => {
                    let Some(kind) = tx
                        .function_name()
                        .and_then(EventKind::from_function_name)
                    else {
                        debug!(
                            function = tx.function_name().unwrap_or("<none>"),
                            "Skipping transaction with unmapped function"
                        );
                        continue;
                    };
                    kind
                }
            };

            events.push(build_event(tx, kind, block_height, next_seq()));
        }
    }

    events
}

fn build_event(
    tx: &Transaction,
    kind: EventKind,
    block_height: Option<u64>,
    seq: u64,
) -> LottoEvent {
    let tx_hash = tx.hash().map(str::to_string);
    let id_stem = tx_hash
        .clone()
        .unwrap_or_else(|| Utc::now().timestamp_millis().to_string());

    let mut event = LottoEvent {
        id: format!("{}-{}", id_stem, seq),
        kind,
        player: None,
        round: None,
        ticket_count: None,
        winner: None,
        prize: None,
        transaction_id: tx_hash,
        block_height,
        timestamp: Utc::now(),
    };

    // Merge print-event fields; later sub-events overwrite earlier ones
    // per field, matching the provider's emission order.
    for sub_event in tx.receipt_events() {
        let Some(value) = sub_event.print_value() else {
            continue;
        };
        if let Some(player) = &value.player {
            event.player = Some(player.clone());
        }
        if let Some(round) = value.round {
            event.round = Some(round);
        }
        if let Some(amount) = value.amount {
            event.ticket_count = Some(amount);
        }
        if let Some(winner) = &value.winner {
            event.winner = Some(winner.clone());
        }
        if let Some(prize) = value.prize_value() {
            event.prize = Some(prize);
        }
    }

    event
}
