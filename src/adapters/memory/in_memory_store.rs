//! In-memory agent store for tests.
//!
//! Holds agent rows in a vector and records every write. Writes for selected
//! agent names and the listing call can be made to fail deterministically.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::domain::agent::AgentRecord;
use crate::domain::foundation::{AgentId, DomainError, ErrorCode, Tier};
use crate::ports::AgentStore;

/// In-memory implementation of AgentStore.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryAgentStore::with_agents(agents).failing_writes_for("broken_agent");
///
/// let report = handler.handle(command).await?;
/// assert_eq!(store.write_count(), report.success_count);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryAgentStore {
    agents: RwLock<Vec<AgentRecord>>,
    write_count: AtomicUsize,
    failing_writes: HashSet<String>,
    fail_listing: bool,
}

impl InMemoryAgentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with agent rows.
    pub fn with_agents(agents: Vec<AgentRecord>) -> Self {
        Self {
            agents: RwLock::new(agents),
            ..Self::default()
        }
    }

    /// Makes every write for the named agent fail.
    pub fn failing_writes_for(mut self, agent_name: impl Into<String>) -> Self {
        self.failing_writes.insert(agent_name.into());
        self
    }

    /// Makes `list_by_tier` fail.
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    // === Test Helpers ===

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    /// The currently stored prompt of an agent.
    pub fn prompt_for(&self, id: &AgentId) -> Option<String> {
        let agents = self.agents.read().ok()?;
        agents
            .iter()
            .find(|a| &a.id == id)
            .and_then(|a| a.system_prompt.clone())
    }
}

fn lock_error() -> DomainError {
    DomainError::new(ErrorCode::InternalError, "In-memory store lock poisoned")
}

#[async_trait]
impl AgentStore for InMemoryAgentStore {
    async fn list_by_tier(&self, tier: Tier) -> Result<Vec<AgentRecord>, DomainError> {
        if self.fail_listing {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                "Failed to fetch agents: listing disabled",
            ));
        }

        let agents = self.agents.read().map_err(|_| lock_error())?;
        let mut matching: Vec<AgentRecord> =
            agents.iter().filter(|a| a.tier == tier).cloned().collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matching)
    }

    async fn find_by_id(&self, id: &AgentId) -> Result<Option<AgentRecord>, DomainError> {
        let agents = self.agents.read().map_err(|_| lock_error())?;
        Ok(agents.iter().find(|a| &a.id == id).cloned())
    }

    async fn update_system_prompt(&self, id: &AgentId, prompt: &str) -> Result<(), DomainError> {
        let mut agents = self.agents.write().map_err(|_| lock_error())?;
        let agent = agents.iter_mut().find(|a| &a.id == id).ok_or_else(|| {
            DomainError::new(ErrorCode::AgentNotFound, format!("Agent not found: {}", id))
        })?;

        if self.failing_writes.contains(&agent.name) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to update agent {}: write rejected", agent.name),
            ));
        }

        agent.system_prompt = Some(prompt.to_string());
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(name: &str, tier: Tier) -> AgentRecord {
        AgentRecord::new(name, vec![]).with_tier(tier)
    }

    #[tokio::test]
    async fn lists_only_requested_tier_sorted_by_name() {
        let store = InMemoryAgentStore::with_agents(vec![
            agent("zeta", Tier::One),
            agent("alpha", Tier::One),
            agent("beta", Tier::Two),
        ]);

        let names: Vec<_> = store
            .list_by_tier(Tier::One)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();

        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn update_stores_prompt_and_records_write() {
        let a = agent("alpha", Tier::One);
        let id = a.id;
        let store = InMemoryAgentStore::with_agents(vec![a]);

        store.update_system_prompt(&id, "prompt").await.unwrap();

        assert_eq!(store.prompt_for(&id), Some("prompt".to_string()));
        assert_eq!(store.write_count(), 1);
        let found = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.system_prompt.as_deref(), Some("prompt"));
    }

    #[tokio::test]
    async fn update_unknown_agent_is_not_found() {
        let store = InMemoryAgentStore::new();
        let err = store
            .update_system_prompt(&AgentId::new(), "prompt")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AgentNotFound);
    }

    #[tokio::test]
    async fn injected_write_failure_leaves_prompt_unchanged() {
        let a = agent("broken", Tier::One);
        let id = a.id;
        let store = InMemoryAgentStore::with_agents(vec![a]).failing_writes_for("broken");

        let err = store.update_system_prompt(&id, "prompt").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(store.prompt_for(&id), None);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn injected_listing_failure() {
        let store = InMemoryAgentStore::new().failing_listing();
        assert!(store.list_by_tier(Tier::One).await.is_err());
    }
}
