//! AgentRecord - an agent row as read from storage.
//!
//! Immutable input to prompt generation; nothing in this crate mutates it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::labels::humanize;
use crate::domain::foundation::{AgentId, AgentStatus, Tier};

/// An agent row read from the `agents` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: AgentId,

    /// Catalog key, e.g. `fda_regulatory_strategist`.
    pub name: String,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Loose capability tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub capabilities: Vec<String>,

    /// Free-form metadata; may carry `domain`, `tone` and `mission`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AgentStatus,

    #[serde(default)]
    pub tier: Tier,

    /// Currently stored prompt, if any.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl AgentRecord {
    /// Creates a record with the given name and capabilities; other fields default.
    pub fn new(name: impl Into<String>, capabilities: Vec<String>) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            display_name: None,
            capabilities,
            metadata: Map::new(),
            status: AgentStatus::default(),
            tier: Tier::default(),
            system_prompt: None,
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Sets the tier.
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    /// Returns a non-blank string metadata value.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Human-facing name: display name, else the humanized catalog key.
    pub fn label(&self) -> String {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => humanize(&self.name),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_rest_row_with_nulls() {
        let row = json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "triage_nurse",
            "display_name": null,
            "capabilities": null,
            "metadata": null,
            "status": null,
            "tier": 1,
            "system_prompt": null,
            "created_at": "2024-01-15T10:30:00Z"
        });

        let agent: AgentRecord = serde_json::from_value(row).unwrap();
        assert_eq!(agent.name, "triage_nurse");
        assert!(agent.capabilities.is_empty());
        assert!(agent.metadata.is_empty());
        assert_eq!(agent.status, AgentStatus::Active);
        assert_eq!(agent.tier, Tier::One);
    }

    #[test]
    fn null_status_in_listing_defaults_without_rejecting_rows() {
        let rows = json!([
            {
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "name": "medical_writer",
                "status": "testing",
                "tier": 1
            },
            {
                "id": "550e8400-e29b-41d4-a716-446655440001",
                "name": "triage_nurse",
                "status": null,
                "tier": 1
            }
        ]);

        let agents: Vec<AgentRecord> = serde_json::from_value(rows).unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].status, AgentStatus::Testing);
        assert_eq!(agents[1].status, AgentStatus::default());
    }

    #[test]
    fn label_prefers_display_name() {
        let agent = AgentRecord::new("triage_nurse", vec![]).with_display_name("Triage Nurse AI");
        assert_eq!(agent.label(), "Triage Nurse AI");
    }

    #[test]
    fn label_falls_back_to_humanized_name() {
        let agent = AgentRecord::new("triage_nurse", vec![]).with_display_name("   ");
        assert_eq!(agent.label(), "Triage Nurse");
    }

    #[test]
    fn metadata_str_ignores_blank_and_non_string_values() {
        let agent = AgentRecord::new("a", vec![])
            .with_metadata("domain", "Oncology")
            .with_metadata("tone", "  ")
            .with_metadata("mission", 42);

        assert_eq!(agent.metadata_str("domain"), Some("Oncology"));
        assert_eq!(agent.metadata_str("tone"), None);
        assert_eq!(agent.metadata_str("mission"), None);
        assert_eq!(agent.metadata_str("missing"), None);
    }
}
