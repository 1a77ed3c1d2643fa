//! Remote EDA configuration document model.
//!
//! The notice server publishes one JSON document per event. Its schema is an
//! external contract; this model types only the fields the client consumes
//! (network rules and the optional service description) and carries every
//! other key through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parsed EDA configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EdaConfig {
    /// CIDR rules naming the lab segments this event applies to.
    #[serde(default)]
    pub networks: Vec<String>,

    /// Optional service description for the installed systemd unit.
    #[serde(default)]
    pub service: Option<ServiceSpec>,

    /// Keys this client does not interpret, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Service section of the document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceSpec {
    /// Human-readable unit description.
    pub description: String,
    /// Command line for ExecStart.
    pub exec_start: String,
}

impl EdaConfig {
    /// Whether the document names any network rule at all.
    pub fn has_network_rules(&self) -> bool {
        !self.networks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "networks": ["192.168.132.0/22", "10.0.0.0/8"],
            "service": {
                "description": "EDA session agent",
                "exec_start": "/usr/local/bin/eda-agent --session summer"
            },
            "organizer": "lcpu",
            "deadline": "2025-08-31"
        }"#;
        let config: EdaConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.networks.len(), 2);
        let service = config.service.unwrap();
        assert_eq!(service.description, "EDA session agent");
        assert!(service.exec_start.starts_with("/usr/local/bin"));
        assert_eq!(config.extra.get("organizer").unwrap(), "lcpu");
    }

    #[test]
    fn test_parse_minimal_document() {
        let config: EdaConfig = serde_json::from_str("{}").unwrap();
        assert!(config.networks.is_empty());
        assert!(config.service.is_none());
        assert!(!config.has_network_rules());
    }

    #[test]
    fn test_unknown_keys_round_trip() {
        let json = r#"{"networks": ["10.0.0.0/8"], "custom": {"nested": true}}"#;
        let config: EdaConfig = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back["custom"]["nested"], true);
        assert_eq!(back["networks"][0], "10.0.0.0/8");
    }

    #[test]
    fn test_non_object_document_rejected() {
        assert!(serde_json::from_str::<EdaConfig>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<EdaConfig>("\"just a string\"").is_err());
    }
}
