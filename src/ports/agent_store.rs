//! Agent store port.
//!
//! Defines the contract for reading agent rows and persisting rendered
//! system prompts. Implementations handle the actual storage access.

use async_trait::async_trait;

use crate::domain::agent::AgentRecord;
use crate::domain::foundation::{AgentId, DomainError, Tier};

/// Storage port for agent rows.
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// List every agent in a tier, ordered by name.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` / `StorageError` on access failure
    async fn list_by_tier(&self, tier: Tier) -> Result<Vec<AgentRecord>, DomainError>;

    /// Find a single agent, including its stored prompt.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &AgentId) -> Result<Option<AgentRecord>, DomainError>;

    /// Overwrite an agent's system prompt and bump its `updated_at`.
    ///
    /// # Errors
    ///
    /// - `AgentNotFound` if no row matched
    /// - `DatabaseError` / `StorageError` on persistence failure
    async fn update_system_prompt(&self, id: &AgentId, prompt: &str) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn AgentStore) {}
    }
}
