//! AgentStatus enum for the lifecycle column of an agent row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Active,
    Inactive,
    Development,
    Testing,
    Deprecated,
    #[serde(other)]
    Unknown,
}

impl AgentStatus {
    /// Parses the stored column value; unrecognised values map to `Unknown`.
    pub fn from_column(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => AgentStatus::Active,
            "inactive" => AgentStatus::Inactive,
            "development" => AgentStatus::Development,
            "testing" => AgentStatus::Testing,
            "deprecated" => AgentStatus::Deprecated,
            _ => AgentStatus::Unknown,
        }
    }

    /// Column representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Inactive => "inactive",
            AgentStatus::Development => "development",
            AgentStatus::Testing => "testing",
            AgentStatus::Deprecated => "deprecated",
            AgentStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(AgentStatus::default(), AgentStatus::Active);
    }

    #[test]
    fn from_column_is_case_insensitive() {
        assert_eq!(AgentStatus::from_column("TESTING"), AgentStatus::Testing);
        assert_eq!(AgentStatus::from_column("retired"), AgentStatus::Unknown);
    }

    #[test]
    fn deserializes_unknown_values_to_catch_all() {
        let status: AgentStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, AgentStatus::Unknown);
        let status: AgentStatus = serde_json::from_str("\"deprecated\"").unwrap();
        assert_eq!(status, AgentStatus::Deprecated);
    }

    #[test]
    fn display_uses_column_value() {
        assert_eq!(AgentStatus::Development.to_string(), "development");
    }
}
