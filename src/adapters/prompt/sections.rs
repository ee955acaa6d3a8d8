//! Section bodies for the template renderer.
//!
//! Each function renders one section body (without its `##` header) from a
//! `SectionContext`. Shared blocks are reused by both document variants.

use crate::domain::agent::AgentRecord;
use crate::domain::profile::AgentProfile;

/// Confidence at or above which the agent may act without confirmation.
pub const CONFIDENCE_AUTONOMOUS: f64 = 0.85;

/// Confidence below which the agent must escalate.
pub const CONFIDENCE_ESCALATE: f64 = 0.60;

/// Target share of responses that pass review.
pub const ACCURACY_TARGET: f64 = 0.95;

pub const EXPERT_IN: &str = "EXPERT IN:";
pub const COMPETENT_IN: &str = "COMPETENT IN:";
pub const LIMITATIONS: &str = "LIMITATIONS:";
pub const AVAILABLE_TOOLS: &str = "### Available Tools";
pub const ESCALATION_TRIGGERS: &str = "### Escalation Triggers";

/// Everything a section body may read.
pub struct SectionContext<'a> {
    pub agent: &'a AgentRecord,
    pub profile: &'a AgentProfile,
    pub label: &'a str,
}

pub type SectionFn = fn(&SectionContext<'_>) -> String;

// ─────────────────────────────────────────────────────────────────────────────
// Formatting helpers
// ─────────────────────────────────────────────────────────────────────────────

/// One `- item` line per entry.
pub fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Proficiency as an integer percentage; out-of-range values pass through.
pub fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

fn threshold(value: f64) -> String {
    format!("{:.2}", value)
}

fn join_blocks(blocks: Vec<String>) -> String {
    blocks
        .into_iter()
        .filter(|b| !b.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared blocks
// ─────────────────────────────────────────────────────────────────────────────

fn identity_block(ctx: &SectionContext<'_>) -> String {
    let p = ctx.profile;
    format!(
        "You are {}, serving as {} in {}.\n\n\
         **Role:** {}\n\
         **Domain:** {}\n\
         **Mission:** {}\n\
         **Value Proposition:** {}",
        ctx.label, p.role_type, p.domain, p.role_type, p.domain, p.mission, p.value_proposition
    )
}

fn capabilities_block(profile: &AgentProfile) -> String {
    let mut blocks = Vec::new();

    if !profile.expert_capabilities.is_empty() {
        let lines: Vec<String> = profile
            .expert_capabilities
            .iter()
            .map(|c| {
                format!(
                    "{}: {} (Proficiency: {})",
                    c.name,
                    c.application,
                    percent(c.proficiency)
                )
            })
            .collect();
        blocks.push(format!("{}\n{}", EXPERT_IN, bullets(&lines)));
    }

    if !profile.competent_capabilities.is_empty() {
        blocks.push(format!("{}\n{}", COMPETENT_IN, bullets(&profile.competent_capabilities)));
    }

    if !profile.limitations.is_empty() {
        blocks.push(format!("{}\n{}", LIMITATIONS, bullets(&profile.limitations)));
    }

    if blocks.is_empty() {
        return "No specific capabilities are configured; rely on general domain knowledge."
            .to_string();
    }
    join_blocks(blocks)
}

fn principles_block(profile: &AgentProfile) -> String {
    if profile.principles.is_empty() {
        return String::new();
    }
    let lines = profile
        .principles
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. **{}**: {}", i + 1, p.name, p.description))
        .collect::<Vec<_>>()
        .join("\n");
    format!("### Operating Principles\n{}", lines)
}

fn communication_block(profile: &AgentProfile) -> String {
    let c = &profile.communication;
    format!(
        "### Communication Style\n- Tone: {}\n- Style: {}\n- Complexity: {}",
        c.tone, c.style, c.complexity
    )
}

fn boundaries_block(profile: &AgentProfile) -> String {
    let mut blocks = Vec::new();
    if !profile.prohibitions.is_empty() {
        blocks.push(format!("### Prohibited Actions\n{}", bullets(&profile.prohibitions)));
    }
    if !profile.protections.is_empty() {
        blocks.push(format!("### Protections\n{}", bullets(&profile.protections)));
    }
    join_blocks(blocks)
}

fn decision_rules_block(profile: &AgentProfile) -> String {
    if profile.decision_rules.is_empty() {
        return String::new();
    }
    let rules = profile
        .decision_rules
        .iter()
        .map(|r| {
            format!(
                "**Scenario: {}**\n- ALWAYS: {}\n- NEVER: {}\n- CONSIDER: {}",
                r.scenario, r.always, r.never, r.consider
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("### Decision Rules\n{}", rules)
}

fn thresholds_block() -> String {
    format!(
        "### Confidence Thresholds\n\
         - Act autonomously at confidence >= {}\n\
         - Ask for confirmation between {} and {}\n\
         - Escalate below {}",
        threshold(CONFIDENCE_AUTONOMOUS),
        threshold(CONFIDENCE_ESCALATE),
        threshold(CONFIDENCE_AUTONOMOUS),
        threshold(CONFIDENCE_ESCALATE)
    )
}

fn workflow_block() -> String {
    "### Workflow\n\
     1. Confirm the request and its context\n\
     2. Gather evidence with the tools available\n\
     3. Analyse against the decision rules\n\
     4. Draft the response in the required output format\n\
     5. Run the safety and compliance checks before replying"
        .to_string()
}

fn tools_block(profile: &AgentProfile) -> String {
    if profile.tools.is_empty() {
        return String::new();
    }
    let entries = profile
        .tools
        .iter()
        .map(|t| {
            let checks = if t.safety_checks.is_empty() {
                "none".to_string()
            } else {
                t.safety_checks.join("; ")
            };
            format!(
                "- **{}**: {}\n  - Use when: {}\n  - Rate limit: {}\n  - Safety checks: {}",
                t.name, t.purpose, t.condition, t.rate_limit, checks
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}\n{}", AVAILABLE_TOOLS, entries)
}

fn compliance_block(profile: &AgentProfile) -> String {
    let c = &profile.compliance;
    let mut blocks = vec![format!("### Compliance Standards\n{}", bullets(&c.standards))];
    if !c.regulations.is_empty() {
        blocks.push(format!("### Regulatory Framework\n{}", bullets(&c.regulations)));
    }
    blocks.push(format!("### Data Handling\n{}", c.data_handling));
    blocks.push(format!("### Privacy\n{}", c.privacy));
    join_blocks(blocks)
}

fn escalation_block(profile: &AgentProfile) -> String {
    if profile.escalation_triggers.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = profile
        .escalation_triggers
        .iter()
        .map(|e| format!("{} -> {}", e.trigger, e.route))
        .collect();
    format!("{}\n{}", ESCALATION_TRIGGERS, bullets(&lines))
}

fn output_format_block(profile: &AgentProfile) -> String {
    format!(
        "Structure every substantive response as:\n\
         1. **Summary** - the answer in one or two sentences\n\
         2. **Details** - supporting analysis at a {} level\n\
         3. **Sources** - references for every factual claim\n\
         4. **Next Steps** - recommended actions and owners\n\
         5. **Confidence** - a value between 0.00 and 1.00 with a short justification",
        profile.communication.complexity.to_lowercase()
    )
}

fn success_criteria_block(profile: &AgentProfile) -> String {
    let mut blocks = Vec::new();
    if !profile.success_criteria.is_empty() {
        blocks.push(format!("### Success Criteria\n{}", bullets(&profile.success_criteria)));
    }
    blocks.push(format!(
        "### Key Metrics\n\
         - Accuracy target: {}\n\
         - Escalation threshold: {}\n\
         - Compliance incidents: 0",
        percent(ACCURACY_TARGET),
        threshold(CONFIDENCE_ESCALATE)
    ));
    join_blocks(blocks)
}

// ─────────────────────────────────────────────────────────────────────────────
// Comprehensive variant sections
// ─────────────────────────────────────────────────────────────────────────────

pub fn identity_with_capabilities(ctx: &SectionContext<'_>) -> String {
    format!(
        "{}\n\n### Core Capabilities\n\n{}",
        identity_block(ctx),
        capabilities_block(ctx.profile)
    )
}

pub fn behavioral_directives(ctx: &SectionContext<'_>) -> String {
    join_blocks(vec![
        principles_block(ctx.profile),
        communication_block(ctx.profile),
        boundaries_block(ctx.profile),
    ])
}

pub fn reasoning_framework(ctx: &SectionContext<'_>) -> String {
    join_blocks(vec![
        "### Decision Process\n\
         1. Identify the question actually being asked\n\
         2. Separate facts, assumptions and unknowns\n\
         3. Weigh options against patient safety, compliance and value\n\
         4. State the recommendation and the reasoning behind it"
            .to_string(),
        decision_rules_block(ctx.profile),
        thresholds_block(),
    ])
}

pub fn execution_methodology(ctx: &SectionContext<'_>) -> String {
    join_blocks(vec![workflow_block(), tools_block(ctx.profile)])
}

pub fn memory_and_context(ctx: &SectionContext<'_>) -> String {
    format!(
        "- Keep the working context limited to the current {} task\n\
         - Summarise long threads before continuing; keep decisions and open questions\n\
         - Never persist protected health information between sessions\n\
         - Reference earlier turns explicitly when relying on them",
        ctx.profile.domain
    )
}

pub fn safety_and_compliance(ctx: &SectionContext<'_>) -> String {
    join_blocks(vec![compliance_block(ctx.profile), escalation_block(ctx.profile)])
}

pub fn output_format(ctx: &SectionContext<'_>) -> String {
    output_format_block(ctx.profile)
}

pub fn performance_monitoring(ctx: &SectionContext<'_>) -> String {
    success_criteria_block(ctx.profile)
}

pub fn continuous_improvement(_ctx: &SectionContext<'_>) -> String {
    "- Record user corrections and the reason behind them\n\
     - Flag recurring questions that the current configuration answers poorly\n\
     - Propose configuration changes through review; never self-modify"
        .to_string()
}

pub fn security_and_governance(ctx: &SectionContext<'_>) -> String {
    let mut blocks = vec![format!(
        "- Operate under: {}\n\
         - Every consequential action is logged for audit\n\
         - Access follows least privilege",
        ctx.profile.compliance.standards.join(", ")
    )];
    if !ctx.profile.protections.is_empty() {
        blocks.push(format!("### Safeguards\n{}", bullets(&ctx.profile.protections)));
    }
    join_blocks(blocks)
}

pub fn deployment_configuration(ctx: &SectionContext<'_>) -> String {
    format!(
        "- Agent Key: {}\n\
         - Lifecycle Status: {}\n\
         - Tier: {}\n\
         - Tool Count: {}",
        ctx.agent.name,
        ctx.agent.status,
        ctx.agent.tier,
        ctx.profile.tools.len()
    )
}

pub fn operational_checklist(ctx: &SectionContext<'_>) -> String {
    format!(
        "Before every response:\n\
         - [ ] The request is within the {} domain or has been redirected\n\
         - [ ] Claims are supported by sources\n\
         - [ ] No prohibited action is taken\n\
         - [ ] Compliance with {} is maintained\n\
         - [ ] Escalation triggers have been checked",
        ctx.profile.domain,
        ctx.profile.compliance.standards.join(", ")
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Standard variant sections
// ─────────────────────────────────────────────────────────────────────────────

pub fn identity(ctx: &SectionContext<'_>) -> String {
    identity_block(ctx)
}

pub fn core_capabilities(ctx: &SectionContext<'_>) -> String {
    capabilities_block(ctx.profile)
}

pub fn directives(ctx: &SectionContext<'_>) -> String {
    let blocks = vec![principles_block(ctx.profile), boundaries_block(ctx.profile)];
    match join_blocks(blocks) {
        body if body.is_empty() => {
            "Follow the operating standards of the organisation.".to_string()
        }
        body => body,
    }
}

pub fn decision_framework(ctx: &SectionContext<'_>) -> String {
    join_blocks(vec![decision_rules_block(ctx.profile), thresholds_block()])
}

pub fn operating_procedures(ctx: &SectionContext<'_>) -> String {
    execution_methodology(ctx)
}

pub fn compliance(ctx: &SectionContext<'_>) -> String {
    compliance_block(ctx.profile)
}

pub fn communication_protocol(ctx: &SectionContext<'_>) -> String {
    communication_block(ctx.profile)
}

pub fn escalation_protocol(ctx: &SectionContext<'_>) -> String {
    join_blocks(vec![
        escalation_block(ctx.profile),
        "When no trigger applies but confidence is low, hand off to a human reviewer with a \
         summary of what is known."
            .to_string(),
    ])
}

pub fn success_metrics(ctx: &SectionContext<'_>) -> String {
    success_criteria_block(ctx.profile)
}
