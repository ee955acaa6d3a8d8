//! Profile module - the structured configuration a system prompt is rendered from.
//!
//! - `model` - `AgentProfile` and its sub-records
//! - `synthesizer` - boilerplate profile for agents missing from the catalog
//! - `catalog` - the declarative profile table and resolution

mod catalog;
mod model;
mod synthesizer;

pub use catalog::{CatalogError, ProfileCatalog, ProfileSource, ResolvedProfile};
pub use model::{
    AgentProfile, Capability, CommunicationStyle, ComplianceProfile, DecisionRule,
    EscalationTrigger, OperatingPrinciple, ToolDescriptor,
};
pub use synthesizer::{synthesize_profile, DEFAULT_PROFICIENCY, MAX_EXPERT_CAPABILITIES};
