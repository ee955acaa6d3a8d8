//! Template-based prompt renderer adapter.
//!
//! Renders system prompts as an ordered list of named sections. Each section
//! body comes from an independent function in `sections`; the document is the
//! title, the sections, and a metadata footer joined by separators.

use sha2::{Digest, Sha256};

use super::sections::{self, SectionContext, SectionFn};
use crate::domain::agent::AgentRecord;
use crate::domain::profile::AgentProfile;
use crate::ports::{PromptRenderer, PromptVariant, RenderError, RenderStamp};

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

pub const METADATA_HEADER: &str = "## METADATA";

static COMPREHENSIVE_HEADERS: [&str; 13] = [
    "## 1. IDENTITY & PURPOSE",
    "## 2. BEHAVIORAL DIRECTIVES",
    "## 3. REASONING FRAMEWORK",
    "## 4. EXECUTION METHODOLOGY",
    "## 5. MEMORY & CONTEXT MANAGEMENT",
    "## 6. SAFETY & COMPLIANCE",
    "## 7. OUTPUT FORMAT",
    "## 8. PERFORMANCE MONITORING",
    "## 9. CONTINUOUS IMPROVEMENT",
    "## 10. SECURITY & GOVERNANCE",
    "## 11. DEPLOYMENT CONFIGURATION",
    "## 12. OPERATIONAL CHECKLIST",
    METADATA_HEADER,
];

static COMPREHENSIVE_SECTIONS: [SectionFn; 12] = [
    sections::identity_with_capabilities,
    sections::behavioral_directives,
    sections::reasoning_framework,
    sections::execution_methodology,
    sections::memory_and_context,
    sections::safety_and_compliance,
    sections::output_format,
    sections::performance_monitoring,
    sections::continuous_improvement,
    sections::security_and_governance,
    sections::deployment_configuration,
    sections::operational_checklist,
];

static STANDARD_HEADERS: [&str; 11] = [
    "## 1. IDENTITY & PURPOSE",
    "## 2. CORE CAPABILITIES",
    "## 3. BEHAVIORAL DIRECTIVES",
    "## 4. DECISION FRAMEWORK",
    "## 5. OPERATING PROCEDURES",
    "## 6. SAFETY & COMPLIANCE",
    "## 7. COMMUNICATION PROTOCOL",
    "## 8. ESCALATION PROTOCOL",
    "## 9. OUTPUT FORMAT",
    "## 10. SUCCESS METRICS",
    METADATA_HEADER,
];

static STANDARD_SECTIONS: [SectionFn; 10] = [
    sections::identity,
    sections::core_capabilities,
    sections::directives,
    sections::decision_framework,
    sections::operating_procedures,
    sections::compliance,
    sections::communication_protocol,
    sections::escalation_protocol,
    sections::output_format,
    sections::success_metrics,
];

/// Template-based implementation of PromptRenderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplatePromptRenderer {
    variant: PromptVariant,
}

impl TemplatePromptRenderer {
    /// Creates a renderer for the given layout variant.
    pub fn new(variant: PromptVariant) -> Self {
        Self { variant }
    }

    fn layout(&self) -> (&'static [&'static str], &'static [SectionFn]) {
        match self.variant {
            PromptVariant::Comprehensive => (&COMPREHENSIVE_HEADERS, &COMPREHENSIVE_SECTIONS),
            PromptVariant::Standard => (&STANDARD_HEADERS, &STANDARD_SECTIONS),
        }
    }

    /// Title plus every numbered section; everything the fingerprint covers.
    fn render_body(&self, ctx: &SectionContext<'_>) -> String {
        let (headers, bodies) = self.layout();
        let mut parts = Vec::with_capacity(bodies.len() + 1);
        parts.push(format!("# SYSTEM PROMPT: {}", ctx.label));
        for (header, body) in headers.iter().zip(bodies.iter()) {
            parts.push(format!("{}\n\n{}", header, body(ctx)));
        }
        parts.join(SECTION_SEPARATOR)
    }

    fn render_footer(&self, agent: &AgentRecord, body: &str, stamp: &RenderStamp) -> String {
        format!(
            "{}\n\n\
             - Agent ID: {}\n\
             - Agent Name: {}\n\
             - Status: {}\n\
             - Tier: {}\n\
             - Prompt Variant: {}\n\
             - Content Fingerprint: sha256:{}\n\
             - Document ID: {}\n\
             - Generated At: {}\n\
             - Last Updated: {}\n",
            METADATA_HEADER,
            agent.id,
            agent.name,
            agent.status,
            agent.tier,
            self.variant,
            fingerprint(body),
            stamp.document_id,
            stamp.generated_at.to_rfc3339(),
            stamp.generated_at.to_date_string(),
        )
    }
}

/// Hex SHA-256 of the stamp-independent part of a document.
pub fn fingerprint(body: &str) -> String {
    let digest = Sha256::digest(body.as_bytes());
    format!("{:x}", digest)
}

impl PromptRenderer for TemplatePromptRenderer {
    fn render(
        &self,
        agent: &AgentRecord,
        profile: &AgentProfile,
        stamp: &RenderStamp,
    ) -> Result<String, RenderError> {
        if agent.name.trim().is_empty() {
            return Err(RenderError::missing_data("agent.name"));
        }
        let label = agent.label();

        let ctx = SectionContext {
            agent,
            profile,
            label: &label,
        };

        let body = self.render_body(&ctx);
        let footer = self.render_footer(agent, &body, stamp);

        Ok(format!("{}{}{}", body, SECTION_SEPARATOR, footer))
    }

    fn section_headers(&self) -> &'static [&'static str] {
        self.layout().0
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
