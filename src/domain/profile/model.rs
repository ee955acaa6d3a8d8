//! AgentProfile and its sub-records.
//!
//! Every field is required. A profile that deserializes is complete, so the
//! renderer never has to invent placeholders for missing data.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// A capability the agent is expert in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    /// Expected in 0.0..=1.0; rendered verbatim as a percentage.
    pub proficiency: f64,
    pub application: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingPrinciple {
    pub name: String,
    pub description: String,
}

/// Scenario-specific guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRule {
    pub scenario: String,
    pub always: String,
    pub never: String,
    pub consider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationStyle {
    pub tone: String,
    pub style: String,
    pub complexity: String,
}

/// A tool the agent may call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub purpose: String,
    /// When the tool should be used.
    pub condition: String,
    pub rate_limit: String,
    pub safety_checks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceProfile {
    pub standards: Vec<String>,
    pub regulations: Vec<String>,
    pub data_handling: String,
    pub privacy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationTrigger {
    pub trigger: String,
    pub route: String,
}

/// Structured per-agent configuration consumed by the prompt renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub role_type: String,
    pub domain: String,
    pub mission: String,
    pub value_proposition: String,
    pub expert_capabilities: Vec<Capability>,
    pub competent_capabilities: Vec<String>,
    pub limitations: Vec<String>,
    pub principles: Vec<OperatingPrinciple>,
    pub decision_rules: Vec<DecisionRule>,
    pub communication: CommunicationStyle,
    pub tools: Vec<ToolDescriptor>,
    pub prohibitions: Vec<String>,
    pub protections: Vec<String>,
    pub compliance: ComplianceProfile,
    pub escalation_triggers: Vec<EscalationTrigger>,
    pub success_criteria: Vec<String>,
}

impl AgentProfile {
    /// Load-time validation of a catalog entry.
    ///
    /// Checks the fields the renderer prints on their own line (so a blank
    /// value would produce an empty heading) and the proficiency range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("role_type", &self.role_type)?;
        require("domain", &self.domain)?;
        require("mission", &self.mission)?;
        require("value_proposition", &self.value_proposition)?;
        require("communication.tone", &self.communication.tone)?;

        for (i, capability) in self.expert_capabilities.iter().enumerate() {
            require(&format!("expert_capabilities[{}].name", i), &capability.name)?;
            if !(0.0..=1.0).contains(&capability.proficiency) {
                return Err(ValidationError::out_of_range(
                    format!("expert_capabilities[{}].proficiency (percent)", i),
                    0,
                    100,
                    (capability.proficiency * 100.0).round() as i32,
                ));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for (i, tool) in self.tools.iter().enumerate() {
            require(&format!("tools[{}].name", i), &tool.name)?;
            if !seen.insert(tool.name.as_str()) {
                return Err(ValidationError::invalid_format(
                    format!("tools[{}].name", i),
                    format!("duplicate tool '{}'", tool.name),
                ));
            }
        }

        if self.compliance.standards.is_empty() {
            return Err(ValidationError::empty_field("compliance.standards"));
        }

        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(())
}
