//! Chainhook notification payload model
//!
//! Typed view of the provider's block-apply notification. Receipt sub-events
//! are a tagged union over the known provider shapes; unrecognized shapes
//! deserialize into a fallback variant and are dropped during extraction
//! instead of being guessed at.
//!
//! Rollback ("undo") blocks are parsed but never processed: only
//! forward-applied blocks produce events. Reorged-away events stay in the
//! feed until they age out.

use serde::Deserialize;

/// Top-level chainhook delivery
#[derive(Debug, Clone, Deserialize)]
pub struct ChainhookPayload {
    /// Newly confirmed blocks
    #[serde(default)]
    pub apply: Vec<BlockApply>,
    /// Reorganized-away blocks, ignored by extraction
    #[serde(default)]
    pub rollback: Vec<serde_json::Value>,
    /// Identity of the hook that fired
    #[serde(default)]
    pub chainhook: Option<HookIdentity>,
}

/// Identity block attached to consolidated deliveries
#[derive(Debug, Clone, Deserialize)]
pub struct HookIdentity {
    pub uuid: Option<String>,
}

/// One confirmed block and its transactions
#[derive(Debug, Clone, Deserialize)]
pub struct BlockApply {
    pub block_identifier: Option<BlockIdentifier>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Block position on the chain
#[derive(Debug, Clone, Deserialize)]
pub struct BlockIdentifier {
    pub index: Option<u64>,
    pub hash: Option<String>,
}

/// One transaction within an applied block
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub transaction_identifier: Option<TransactionIdentifier>,
    pub metadata: Option<TransactionMetadata>,
    /// Alternate location for the invoked function on older payload revisions
    pub contract_call: Option<ContractCall>,
}

impl Transaction {
    /// Transaction hash, if the payload carries one
    pub fn hash(&self) -> Option<&str> {
        self.transaction_identifier
            .as_ref()
            .and_then(|t| t.hash.as_deref())
    }

    /// Invoked contract function name, checking both payload revisions
    pub fn function_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.kind.as_ref())
            .and_then(|k| k.data.as_ref())
            .and_then(|d| d.function_name.as_deref())
            .or_else(|| {
                self.contract_call
                    .as_ref()
                    .and_then(|c| c.function_name.as_deref())
            })
    }

    /// Receipt sub-events, empty when the receipt is absent
    pub fn receipt_events(&self) -> &[ReceiptEvent] {
        self.metadata
            .as_ref()
            .and_then(|m| m.receipt.as_ref())
            .map(|r| r.events.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionIdentifier {
    pub hash: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionMetadata {
    pub kind: Option<TransactionKind>,
    pub receipt: Option<TransactionReceipt>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionKind {
    pub data: Option<TransactionKindData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionKindData {
    pub function_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractCall {
    pub function_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionReceipt {
    #[serde(default)]
    pub events: Vec<ReceiptEvent>,
}

/// Contract-emitted sub-event from a transaction receipt
///
/// The provider has shipped two shapes for print events; both are matched
/// explicitly. Anything else falls into `Unrecognized` and is dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ReceiptEvent {
    #[serde(rename = "SmartContractEvent")]
    SmartContract { data: Option<ContractEventBody> },
    #[serde(rename = "print_event")]
    Print { contract_event: Option<ContractEventBody> },
    #[serde(other)]
    Unrecognized,
}

impl ReceiptEvent {
    /// Decoded print value, if this sub-event carries one
    pub fn print_value(&self) -> Option<&PrintValue> {
        match self {
            ReceiptEvent::SmartContract { data } => data.as_ref().and_then(|d| d.value.as_ref()),
            ReceiptEvent::Print { contract_event } => {
                contract_event.as_ref().and_then(|c| c.value.as_ref())
            }
            ReceiptEvent::Unrecognized => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractEventBody {
    pub value: Option<PrintValue>,
}

/// Named fields read out of a decoded print value
///
/// Decoded Clarity prints are not always objects (a bare string print is
/// legal), and field types vary between contract revisions. Probing is
/// lenient: a non-object value or a wrong-typed field reads as absent
/// instead of failing the payload parse.
#[derive(Debug, Clone, Default)]
pub struct PrintValue {
    pub player: Option<String>,
    pub round: Option<u64>,
    pub amount: Option<u64>,
    pub winner: Option<String>,
    pub prize: Option<u64>,
    /// Hyphenated alternate key some contract revisions emit
    pub winner_prize: Option<u64>,
}

impl PrintValue {
    fn from_json(raw: &serde_json::Value) -> Self {
        Self {
            player: raw
                .get("player")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            round: raw.get("round").and_then(serde_json::Value::as_u64),
            amount: raw.get("amount").and_then(serde_json::Value::as_u64),
            winner: raw
                .get("winner")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            prize: raw.get("prize").and_then(serde_json::Value::as_u64),
            winner_prize: raw
                .get("winner-prize")
                .and_then(serde_json::Value::as_u64),
        }
    }

    /// Prize under either key, preferring the plain one
    pub fn prize_value(&self) -> Option<u64> {
        self.prize.or(self.winner_prize)
    }
}

impl<'de> Deserialize<'de> for PrintValue {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(PrintValue::from_json(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block_apply_payload() {
        let raw = serde_json::json!({
            "apply": [{
                "block_identifier": { "index": 120, "hash": "0xblock" },
                "transactions": [{
                    "transaction_identifier": { "hash": "0xabc" },
                    "metadata": {
                        "kind": { "data": { "function_name": "buy-ticket" } },
                        "receipt": {
                            "events": [{
                                "type": "SmartContractEvent",
                                "data": { "value": { "player": "SP1", "round": 3 } }
                            }]
                        }
                    }
                }]
            }],
            "rollback": []
        });

        let payload: ChainhookPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(payload.apply.len(), 1);
        let tx = &payload.apply[0].transactions[0];
        assert_eq!(tx.hash(), Some("0xabc"));
        assert_eq!(tx.function_name(), Some("buy-ticket"));
        let value = tx.receipt_events()[0].print_value().unwrap();
        assert_eq!(value.player.as_deref(), Some("SP1"));
        assert_eq!(value.round, Some(3));
    }

    #[test]
    fn test_print_event_shape() {
        let raw = serde_json::json!({
            "type": "print_event",
            "contract_event": { "value": { "winner": "SP2", "winner-prize": 5000 } }
        });
        let event: ReceiptEvent = serde_json::from_value(raw).unwrap();
        let value = event.print_value().unwrap();
        assert_eq!(value.winner.as_deref(), Some("SP2"));
        assert_eq!(value.prize_value(), Some(5000));
    }

    #[test]
    fn test_unrecognized_sub_event_shape() {
        let raw = serde_json::json!({ "type": "StxTransferEvent", "data": {} });
        let event: ReceiptEvent = serde_json::from_value(raw).unwrap();
        assert!(matches!(event, ReceiptEvent::Unrecognized));
        assert!(event.print_value().is_none());
    }

    #[test]
    fn test_fallback_function_name_location() {
        let raw = serde_json::json!({
            "transaction_identifier": { "hash": "0xdef" },
            "contract_call": { "function_name": "draw-winner" }
        });
        let tx: Transaction = serde_json::from_value(raw).unwrap();
        assert_eq!(tx.function_name(), Some("draw-winner"));
    }

    #[test]
    fn test_string_print_value_does_not_poison_the_payload() {
        // A bare string print is a legal decoded Clarity value
        let raw = serde_json::json!({
            "apply": [{
                "transactions": [{
                    "transaction_identifier": { "hash": "0xabc" },
                    "metadata": {
                        "kind": { "data": { "function_name": "buy-ticket" } },
                        "receipt": {
                            "events": [{
                                "type": "SmartContractEvent",
                                "data": { "value": "round started" }
                            }]
                        }
                    }
                }]
            }]
        });

        let payload: ChainhookPayload = serde_json::from_value(raw).unwrap();
        let tx = &payload.apply[0].transactions[0];
        assert_eq!(tx.function_name(), Some("buy-ticket"));
        let value = tx.receipt_events()[0].print_value().unwrap();
        assert!(value.player.is_none());
        assert!(value.round.is_none());
    }

    #[test]
    fn test_wrong_typed_fields_read_as_absent() {
        let raw = serde_json::json!({
            "player": "SP1",
            "round": "not-a-number",
            "amount": { "nested": true }
        });
        let value: PrintValue = serde_json::from_value(raw).unwrap();
        assert_eq!(value.player.as_deref(), Some("SP1"));
        assert!(value.round.is_none());
        assert!(value.amount.is_none());
    }

    #[test]
    fn test_missing_nesting_is_tolerated() {
        let payload: ChainhookPayload = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(payload.apply.is_empty());

        let tx: Transaction = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(tx.hash().is_none());
        assert!(tx.function_name().is_none());
        assert!(tx.receipt_events().is_empty());
    }
}
