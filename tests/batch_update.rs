//! Integration tests for the batch prompt update.
//!
//! These tests drive `RegeneratePromptsHandler` end to end against the
//! in-memory store, the embedded catalog and the template renderer:
//! 1. Every stored document carries each section header once, in order
//! 2. Optional sub-sections follow their source lists
//! 3. Write failures stay isolated to the failing agents
//! 4. Re-rendering changes only the stamp lines

use std::sync::Arc;

use prompt_seeder::adapters::{FixedStampSource, InMemoryAgentStore, TemplatePromptRenderer};
use prompt_seeder::application::{RegeneratePromptsCommand, RegeneratePromptsHandler};
use prompt_seeder::domain::agent::AgentRecord;
use prompt_seeder::domain::foundation::{Tier, Timestamp};
use prompt_seeder::domain::profile::ProfileCatalog;
use prompt_seeder::ports::{PromptRenderer, PromptVariant, RenderStamp};

// =============================================================================
// Test Infrastructure
// =============================================================================

const STAMP_LINES: &[&str] = &["- Document ID:", "- Generated At:", "- Last Updated:"];

fn handler(
    store: Arc<InMemoryAgentStore>,
    variant: PromptVariant,
    stamp: RenderStamp,
) -> RegeneratePromptsHandler {
    RegeneratePromptsHandler::new(
        store,
        Arc::new(ProfileCatalog::embedded().unwrap()),
        Arc::new(TemplatePromptRenderer::new(variant)),
        Arc::new(FixedStampSource::new(stamp)),
    )
}

fn comprehensive_handler(store: Arc<InMemoryAgentStore>) -> RegeneratePromptsHandler {
    handler(store, PromptVariant::Comprehensive, stamp_at(1705314600, "sp-fixed"))
}

fn stamp_at(secs: u64, id: &str) -> RenderStamp {
    RenderStamp::new(Timestamp::from_unix_secs(secs), id)
}

fn tier_one() -> RegeneratePromptsCommand {
    RegeneratePromptsCommand {
        tier: Tier::One,
        dry_run: false,
    }
}

fn caps(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

fn mixed_agents() -> Vec<AgentRecord> {
    vec![
        AgentRecord::new("fda_regulatory_strategist", caps(&["regulatory"])),
        AgentRecord::new("digital_health_advisor", caps(&["digital_health"])),
        AgentRecord::new("test_agent", caps(&["diagnostics", "triage"])),
        AgentRecord::new(
            "care_coordinator",
            caps(&["scheduling", "discharge", "referrals", "follow_up", "education", "billing"]),
        ),
        AgentRecord::new("no_caps_agent", Vec::new()),
        AgentRecord::new("tier_two_agent", caps(&["ignored"])).with_tier(Tier::Two),
    ]
}

fn stored_documents(store: &InMemoryAgentStore, agents: &[AgentRecord]) -> Vec<(String, String)> {
    agents
        .iter()
        .filter_map(|a| store.prompt_for(&a.id).map(|doc| (a.name.clone(), doc)))
        .collect()
}

fn without_stamp_lines(doc: &str) -> String {
    doc.lines()
        .filter(|line| !STAMP_LINES.iter().any(|prefix| line.starts_with(prefix)))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Section presence
// =============================================================================

#[tokio::test]
async fn every_document_has_each_header_once_in_order() {
    for variant in [PromptVariant::Comprehensive, PromptVariant::Standard] {
        let agents = mixed_agents();
        let store = Arc::new(InMemoryAgentStore::with_agents(agents.clone()));
        let handler = handler(store.clone(), variant, stamp_at(1705314600, "sp-fixed"));
        let headers = TemplatePromptRenderer::new(variant).section_headers();

        let report = handler.handle(tier_one()).await.unwrap();
        assert_eq!(report.total, 5);
        assert_eq!(report.success_count, 5);

        let documents = stored_documents(&store, &agents);
        assert_eq!(documents.len(), 5);

        for (name, doc) in documents {
            let mut last = 0;
            for header in headers {
                assert_eq!(doc.matches(header).count(), 1, "{} in {} ({})", header, name, variant);
                let position = doc.find(header).unwrap();
                assert!(position >= last, "{} out of order in {}", header, name);
                last = position;
            }
        }
    }
}

#[tokio::test]
async fn other_tiers_are_left_untouched() {
    let agents = mixed_agents();
    let store = Arc::new(InMemoryAgentStore::with_agents(agents.clone()));
    let handler = comprehensive_handler(store.clone());

    handler.handle(tier_one()).await.unwrap();

    let tier_two = agents.iter().find(|a| a.tier == Tier::Two).unwrap();
    assert!(store.prompt_for(&tier_two.id).is_none());
}

// =============================================================================
// Conditional sub-sections
// =============================================================================

#[tokio::test]
async fn tools_section_follows_tool_list() {
    let agents = mixed_agents();
    let store = Arc::new(InMemoryAgentStore::with_agents(agents.clone()));
    let handler = comprehensive_handler(store.clone());

    handler.handle(tier_one()).await.unwrap();

    let by_name = |name: &str| {
        let agent = agents.iter().find(|a| a.name == name).unwrap();
        store.prompt_for(&agent.id).unwrap()
    };

    let no_tools = by_name("digital_health_advisor");
    assert!(!no_tools.contains("### Available Tools"));

    let synthesized = by_name("test_agent");
    assert_eq!(synthesized.matches("### Available Tools").count(), 1);
    assert_eq!(synthesized.matches("- **knowledge_base_search**:").count(), 1);
    assert_eq!(synthesized.matches("- **audit_log**:").count(), 1);
}

#[tokio::test]
async fn synthesized_agent_with_two_tags_has_no_competent_section() {
    let agent = AgentRecord::new("test_agent", caps(&["diagnostics", "triage"]));
    let store = Arc::new(InMemoryAgentStore::with_agents(vec![agent.clone()]));
    let handler = comprehensive_handler(store.clone());

    let report = handler.handle(tier_one()).await.unwrap();
    assert_eq!(report.synthesized_count, 1);

    let doc = store.prompt_for(&agent.id).unwrap();
    assert!(doc.contains("EXPERT IN:\n- Diagnostics: "));
    assert!(doc.contains("\n- Triage: "));
    assert!(!doc.contains("COMPETENT IN:"));
}

#[tokio::test]
async fn capabilities_beyond_four_are_competent() {
    let agents = mixed_agents();
    let store = Arc::new(InMemoryAgentStore::with_agents(agents.clone()));
    let handler = comprehensive_handler(store.clone());

    handler.handle(tier_one()).await.unwrap();

    let coordinator = agents.iter().find(|a| a.name == "care_coordinator").unwrap();
    let doc = store.prompt_for(&coordinator.id).unwrap();

    let expert = doc.split("EXPERT IN:\n").nth(1).unwrap();
    let expert_lines = expert.lines().take_while(|l| l.starts_with("- ")).count();
    assert_eq!(expert_lines, 4);

    let competent = doc.split("COMPETENT IN:\n").nth(1).unwrap();
    let competent_lines: Vec<&str> = competent
        .lines()
        .take_while(|l| l.starts_with("- "))
        .collect();
    assert_eq!(competent_lines, vec!["- Education", "- Billing"]);
}

// =============================================================================
// Failure isolation
// =============================================================================

#[tokio::test]
async fn failing_writes_are_isolated() {
    let agents = mixed_agents();
    let store = Arc::new(
        InMemoryAgentStore::with_agents(agents.clone())
            .failing_writes_for("test_agent")
            .failing_writes_for("care_coordinator"),
    );
    let handler = comprehensive_handler(store.clone());

    let report = handler.handle(tier_one()).await.unwrap();

    assert_eq!(report.total, 5);
    assert_eq!(report.success_count, 3);
    assert_eq!(report.failure_count, 2);

    let mut failed: Vec<&str> = report.failures.iter().map(|f| f.agent_name.as_str()).collect();
    failed.sort();
    assert_eq!(failed, vec!["care_coordinator", "test_agent"]);
    assert_eq!(store.write_count(), 3);
    assert!(report.verification.unwrap().passed());
}

// =============================================================================
// Re-rendering
// =============================================================================

#[tokio::test]
async fn rerun_changes_only_stamp_lines() {
    let agents = mixed_agents();
    let store = Arc::new(InMemoryAgentStore::with_agents(agents.clone()));

    handler(store.clone(), PromptVariant::Comprehensive, stamp_at(1705314600, "sp-first"))
        .handle(tier_one())
        .await
        .unwrap();
    let first = stored_documents(&store, &agents);

    handler(store.clone(), PromptVariant::Comprehensive, stamp_at(1707993000, "sp-second"))
        .handle(tier_one())
        .await
        .unwrap();
    let second = stored_documents(&store, &agents);

    assert_eq!(first.len(), second.len());
    for ((name, a), (_, b)) in first.iter().zip(second.iter()) {
        assert_ne!(a, b, "{} should be re-stamped", name);
        assert_eq!(without_stamp_lines(a), without_stamp_lines(b), "{} body changed", name);
    }
}

#[tokio::test]
async fn existing_prompts_are_overwritten() {
    let mut agent = AgentRecord::new("hipaa_compliance_officer", caps(&["privacy"]));
    agent.system_prompt = Some("Manually edited prompt".to_string());
    let store = Arc::new(InMemoryAgentStore::with_agents(vec![agent.clone()]));
    let handler = handler(store.clone(), PromptVariant::Standard, stamp_at(1705314600, "sp-fixed"));

    handler.handle(tier_one()).await.unwrap();

    let doc = store.prompt_for(&agent.id).unwrap();
    assert!(!doc.contains("Manually edited prompt"));
    assert!(doc.starts_with("# SYSTEM PROMPT: "));
}
