//! RegeneratePromptsHandler - Command handler for the batch prompt update.
//!
//! Fetches every agent of a tier, resolves its profile, renders a document
//! and overwrites the stored prompt. Agents are processed one at a time;
//! a failure on one agent is recorded and the loop moves on. After the loop
//! the first updated agent is re-read and its document spot-checked for the
//! renderer's section headers.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::agent::AgentRecord;
use crate::domain::foundation::{AgentId, DomainError, Tier, Timestamp};
use crate::domain::profile::{ProfileCatalog, ProfileSource};
use crate::ports::{AgentStore, PromptRenderer, RenderError, StampSource};

/// Command to regenerate the prompts of one tier.
#[derive(Debug, Clone, Copy)]
pub struct RegeneratePromptsCommand {
    pub tier: Tier,
    /// Render everything but write nothing.
    pub dry_run: bool,
}

/// One agent that could not be updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUpdate {
    pub agent_name: String,
    pub error: String,
}

/// Result of the post-run spot check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub agent_name: String,
    pub missing_headers: Vec<String>,
}

impl VerificationOutcome {
    pub fn passed(&self) -> bool {
        self.missing_headers.is_empty()
    }
}

/// Aggregated outcome of a run.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub tier: Tier,
    pub dry_run: bool,
    pub total: usize,
    pub success_count: usize,
    pub failure_count: usize,
    /// Agents rendered from a synthesized profile rather than a catalog entry.
    pub synthesized_count: usize,
    pub failures: Vec<FailedUpdate>,
    pub verification: Option<VerificationOutcome>,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
}

impl UpdateReport {
    fn empty(cmd: &RegeneratePromptsCommand, started_at: Timestamp) -> Self {
        Self {
            tier: cmd.tier,
            dry_run: cmd.dry_run,
            total: 0,
            success_count: 0,
            failure_count: 0,
            synthesized_count: 0,
            failures: Vec::new(),
            verification: None,
            started_at,
            finished_at: started_at,
        }
    }

    fn record_failure(&mut self, agent_name: &str, error: &AgentUpdateError) {
        self.failure_count += 1;
        self.failures.push(FailedUpdate {
            agent_name: agent_name.to_string(),
            error: error.to_string(),
        });
    }

    /// Wall-clock duration of the run in milliseconds.
    pub fn elapsed_millis(&self) -> i64 {
        self.finished_at.millis_since(&self.started_at)
    }
}

impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.dry_run { " (dry run)" } else { "" };
        let verb = if self.dry_run { "Rendered" } else { "Updated" };

        writeln!(f, "Prompt regeneration summary for tier {}{}", self.tier, mode)?;
        writeln!(f, "  Agents:      {}", self.total)?;
        writeln!(f, "  {:<12} {}", format!("{}:", verb), self.success_count)?;
        writeln!(f, "  Failed:      {}", self.failure_count)?;
        writeln!(f, "  Synthesized: {}", self.synthesized_count)?;
        write!(f, "  Duration:    {} ms", self.elapsed_millis())?;

        if !self.failures.is_empty() {
            write!(f, "\nFailures:")?;
            for failure in &self.failures {
                write!(f, "\n  - {}: {}", failure.agent_name, failure.error)?;
            }
        }

        if let Some(verification) = &self.verification {
            if verification.passed() {
                write!(
                    f,
                    "\nVerification ({}): all section headers present",
                    verification.agent_name
                )?;
            } else {
                write!(
                    f,
                    "\nVerification ({}): missing {}",
                    verification.agent_name,
                    verification.missing_headers.join(", ")
                )?;
            }
        }

        Ok(())
    }
}

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum RegeneratePromptsError {
    #[error("Failed to fetch agents for tier {tier}: {source}")]
    FetchFailed {
        tier: Tier,
        #[source]
        source: DomainError,
    },
}

/// Per-agent failure; recorded in the report, never aborts the run.
#[derive(Debug, Error)]
pub enum AgentUpdateError {
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Write failed: {0}")]
    Write(#[from] DomainError),
}

/// Handler for the batch update.
pub struct RegeneratePromptsHandler {
    store: Arc<dyn AgentStore>,
    catalog: Arc<ProfileCatalog>,
    renderer: Arc<dyn PromptRenderer>,
    stamps: Arc<dyn StampSource>,
}

impl RegeneratePromptsHandler {
    pub fn new(
        store: Arc<dyn AgentStore>,
        catalog: Arc<ProfileCatalog>,
        renderer: Arc<dyn PromptRenderer>,
        stamps: Arc<dyn StampSource>,
    ) -> Self {
        Self {
            store,
            catalog,
            renderer,
            stamps,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegeneratePromptsCommand,
    ) -> Result<UpdateReport, RegeneratePromptsError> {
        let mut report = UpdateReport::empty(&cmd, Timestamp::now());

        // 1. Fetch
        let agents = self
            .store
            .list_by_tier(cmd.tier)
            .await
            .map_err(|source| RegeneratePromptsError::FetchFailed {
                tier: cmd.tier,
                source,
            })?;

        report.total = agents.len();
        if agents.is_empty() {
            tracing::info!(tier = %cmd.tier, "No agents found");
            report.finished_at = Timestamp::now();
            return Ok(report);
        }

        tracing::info!(
            tier = %cmd.tier,
            count = agents.len(),
            dry_run = cmd.dry_run,
            "Regenerating system prompts"
        );

        // 2. Resolve, render, write
        let mut first_updated: Option<AgentId> = None;
        for agent in &agents {
            match self.regenerate(agent, cmd.dry_run, &mut report).await {
                Ok(()) => {
                    report.success_count += 1;
                    if first_updated.is_none() {
                        first_updated = Some(agent.id);
                    }
                }
                Err(error) => {
                    tracing::warn!(agent = %agent.name, %error, "Failed to update system prompt");
                    report.record_failure(&agent.name, &error);
                }
            }
        }

        // 3. Spot check
        if !cmd.dry_run {
            if let Some(id) = first_updated {
                report.verification = self.verify(&id).await;
            }
        }

        report.finished_at = Timestamp::now();
        Ok(report)
    }

    async fn regenerate(
        &self,
        agent: &AgentRecord,
        dry_run: bool,
        report: &mut UpdateReport,
    ) -> Result<(), AgentUpdateError> {
        let resolved = self.catalog.resolve_for_agent(agent);
        if resolved.source == ProfileSource::Synthesized {
            report.synthesized_count += 1;
        }

        let stamp = self.stamps.next_stamp();
        let prompt = self.renderer.render(agent, &resolved.profile, &stamp)?;

        if dry_run {
            tracing::info!(
                agent = %agent.name,
                source = ?resolved.source,
                bytes = prompt.len(),
                "Rendered system prompt"
            );
            return Ok(());
        }

        self.store.update_system_prompt(&agent.id, &prompt).await?;

        tracing::info!(
            agent = %agent.name,
            source = ?resolved.source,
            document_id = %stamp.document_id,
            "Updated system prompt"
        );
        Ok(())
    }

    async fn verify(&self, id: &AgentId) -> Option<VerificationOutcome> {
        let agent = match self.store.find_by_id(id).await {
            Ok(Some(agent)) => agent,
            Ok(None) => {
                tracing::warn!(agent_id = %id, "Verification skipped: agent no longer exists");
                return None;
            }
            Err(error) => {
                tracing::warn!(agent_id = %id, %error, "Verification skipped: re-read failed");
                return None;
            }
        };

        let document = agent.system_prompt.as_deref().unwrap_or_default();
        let missing_headers: Vec<String> = self
            .renderer
            .section_headers()
            .iter()
            .filter(|header| !document.contains(**header))
            .map(|header| header.to_string())
            .collect();

        if missing_headers.is_empty() {
            tracing::info!(agent = %agent.name, "Verification passed");
        } else {
            tracing::warn!(
                agent = %agent.name,
                missing = ?missing_headers,
                "Verification found missing section headers"
            );
        }

        Some(VerificationOutcome {
            agent_name: agent.name,
            missing_headers,
        })
    }
}
