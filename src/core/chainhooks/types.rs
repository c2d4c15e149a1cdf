//! Chainhook provider wire types

use serde::{Deserialize, Serialize};

/// A chainhook definition as the provider API expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainhookDefinition {
    pub name: String,
    pub version: String,
    pub chain: String,
    pub network: String,
    pub filters: HookFilters,
    pub action: HookAction,
    pub options: HookOptions,
}

/// Event filters attached to a definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookFilters {
    pub events: Vec<EventFilter>,
}

/// One contract-call filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(rename = "type")]
    pub kind: String,
    pub contract_identifier: String,
    /// Absent for catch-all hooks watching the whole contract
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
}

/// Delivery action for a hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl HookAction {
    /// HTTP POST delivery to the given URL
    pub fn http_post(url: impl Into<String>) -> Self {
        Self {
            kind: "http_post".to_string(),
            url: url.into(),
        }
    }
}

/// Registration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookOptions {
    pub decode_clarity_values: bool,
    pub enable_on_registration: bool,
}

impl Default for HookOptions {
    fn default() -> Self {
        Self {
            decode_clarity_values: true,
            enable_on_registration: true,
        }
    }
}

/// One registered hook as returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainhookRecord {
    pub uuid: String,
    pub definition: Option<ChainhookDefinition>,
    #[serde(default)]
    pub status: Option<HookStatus>,
}

impl ChainhookRecord {
    /// Hook name, empty when the provider omitted the definition
    pub fn name(&self) -> &str {
        self.definition.as_ref().map(|d| d.name.as_str()).unwrap_or("")
    }

    /// Current delivery URL, if known
    pub fn action_url(&self) -> Option<&str> {
        self.definition.as_ref().map(|d| d.action.url.as_str())
    }
}

/// Provider-side hook status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookStatus {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Paged list of registered hooks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainhookList {
    pub total: usize,
    #[serde(default)]
    pub results: Vec<ChainhookRecord>,
}

/// Provider API status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub server_version: Option<String>,
}

/// Response to a registration call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub uuid: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_serialization() {
        let definition = ChainhookDefinition {
            name: "StacksLotto-WinnerDrawn".to_string(),
            version: "1".to_string(),
            chain: "stacks".to_string(),
            network: "testnet".to_string(),
            filters: HookFilters {
                events: vec![EventFilter {
                    kind: "contract_call".to_string(),
                    contract_identifier: "SP000.lotto".to_string(),
                    function_name: Some("draw-winner".to_string()),
                }],
            },
            action: HookAction::http_post("https://relay.example.com/api/chainhook/events"),
            options: HookOptions::default(),
        };

        let json = serde_json::to_value(&definition).unwrap();
        assert_eq!(json["filters"]["events"][0]["type"], "contract_call");
        assert_eq!(json["action"]["type"], "http_post");
        assert_eq!(json["options"]["decode_clarity_values"], true);
    }

    #[test]
    fn test_catch_all_filter_omits_function_name() {
        let filter = EventFilter {
            kind: "contract_call".to_string(),
            contract_identifier: "SP000.lotto".to_string(),
            function_name: None,
        };
        let json = serde_json::to_value(&filter).unwrap();
        assert!(json.get("function_name").is_none());
    }

    #[test]
    fn test_record_accessors_with_missing_definition() {
        let record: ChainhookRecord =
            serde_json::from_value(serde_json::json!({ "uuid": "abc-123" })).unwrap();
        assert_eq!(record.name(), "");
        assert!(record.action_url().is_none());
    }
}
