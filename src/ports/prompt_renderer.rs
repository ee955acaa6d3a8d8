//! Prompt Renderer Port - system prompt generation interface.
//!
//! This port defines the contract for rendering an agent's system prompt
//! from its stored row and resolved profile. Adapters (like
//! TemplatePromptRenderer) provide the implementation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::agent::AgentRecord;
use crate::domain::foundation::Timestamp;
use crate::domain::profile::AgentProfile;

/// Port for rendering system prompt documents.
///
/// # Contract
///
/// Implementations must:
/// - Emit every header from `section_headers()` exactly once, in order
/// - Omit optional sub-sections whose source list is empty
/// - Depend on nothing but the arguments; the stamp carries time and identity
pub trait PromptRenderer: Send + Sync {
    /// Render the full document.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the agent cannot be identified in the document.
    fn render(
        &self,
        agent: &AgentRecord,
        profile: &AgentProfile,
        stamp: &RenderStamp,
    ) -> Result<String, RenderError>;

    /// Mandatory section headers, in document order.
    fn section_headers(&self) -> &'static [&'static str];
}

/// The ambient inputs of a render: when, and under which identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStamp {
    pub generated_at: Timestamp,
    pub document_id: String,
}

impl RenderStamp {
    pub fn new(generated_at: Timestamp, document_id: impl Into<String>) -> Self {
        Self {
            generated_at,
            document_id: document_id.into(),
        }
    }
}

/// Document layout variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVariant {
    /// Twelve-section operational document.
    #[default]
    Comprehensive,

    /// Ten-section document centred on capabilities and protocols.
    Standard,
}

impl fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptVariant::Comprehensive => write!(f, "comprehensive"),
            PromptVariant::Standard => write!(f, "standard"),
        }
    }
}

impl FromStr for PromptVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comprehensive" => Ok(PromptVariant::Comprehensive),
            "standard" => Ok(PromptVariant::Standard),
            other => Err(format!(
                "unknown prompt variant '{}' (expected comprehensive or standard)",
                other
            )),
        }
    }
}

/// Errors that can occur during prompt rendering.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Missing required data for rendering.
    #[error("Missing required data: {field}")]
    MissingData { field: String },
}

impl RenderError {
    /// Creates a missing data error.
    pub fn missing_data(field: impl Into<String>) -> Self {
        Self::MissingData {
            field: field.into(),
        }
    }
}
