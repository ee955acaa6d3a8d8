//! Supabase REST implementation of AgentStore.
//!
//! Talks to the PostgREST endpoint (`/rest/v1/<table>`) with the service-role
//! key sent both as `apikey` and as a bearer token.
//!
//! # Configuration
//!
//! ```ignore
//! let store = SupabaseRestStore::new(&config.supabase)?;
//! let agents = store.list_by_tier(Tier::One).await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::config::SupabaseConfig;
use crate::domain::agent::AgentRecord;
use crate::domain::foundation::{AgentId, DomainError, ErrorCode, Tier, Timestamp};
use crate::ports::AgentStore;

const AGENT_SELECT: &str = "id,name,display_name,capabilities,metadata,status,tier,system_prompt";

/// Body of the PATCH that overwrites a prompt.
#[derive(Debug, Serialize)]
struct PromptUpdate<'a> {
    system_prompt: &'a str,
    updated_at: Timestamp,
}

/// Supabase PostgREST store.
pub struct SupabaseRestStore {
    base_url: String,
    table: String,
    service_key: Secret<String>,
    timeout: Duration,
    client: Client,
}

impl SupabaseRestStore {
    /// Creates a store from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if the HTTP client cannot be built.
    pub fn new(config: &SupabaseConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            table: config.table.clone(),
            service_key: Secret::new(config.service_key.clone()),
            timeout: config.timeout(),
            client,
        })
    }

    /// Builds the table endpoint URL.
    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.service_key.expose_secret();
        request
            .header("apikey", key.as_str())
            .bearer_auth(key)
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response, DomainError> {
        let response = self.authorized(request).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("{} timed out after {}s", action, self.timeout.as_secs())
            } else if e.is_connect() {
                format!("{}: connection failed: {}", action, e)
            } else {
                format!("{}: {}", action, e)
            };
            DomainError::new(ErrorCode::StorageError, message)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("{}: HTTP {}: {}", action, status.as_u16(), body),
            )
            .with_detail("status", status.as_u16().to_string()));
        }

        Ok(response)
    }

    async fn decode_rows(
        response: Response,
        action: &str,
    ) -> Result<Vec<AgentRecord>, DomainError> {
        response.json::<Vec<AgentRecord>>().await.map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("{}: invalid response body: {}", action, e),
            )
        })
    }
}

#[async_trait]
impl AgentStore for SupabaseRestStore {
    async fn list_by_tier(&self, tier: Tier) -> Result<Vec<AgentRecord>, DomainError> {
        let request = self.client.get(self.table_url()).query(&[
            ("select", AGENT_SELECT.to_string()),
            ("tier", format!("eq.{}", tier.as_i32())),
            ("order", "name.asc".to_string()),
        ]);

        let response = self.send(request, "Failed to fetch agents").await?;
        let agents = Self::decode_rows(response, "Failed to fetch agents").await?;

        tracing::debug!(tier = %tier, rows = agents.len(), "Fetched agents");
        Ok(agents)
    }

    async fn find_by_id(&self, id: &AgentId) -> Result<Option<AgentRecord>, DomainError> {
        let request = self.client.get(self.table_url()).query(&[
            ("select", AGENT_SELECT.to_string()),
            ("id", format!("eq.{}", id)),
            ("limit", "1".to_string()),
        ]);

        let response = self.send(request, "Failed to fetch agent").await?;
        let mut agents = Self::decode_rows(response, "Failed to fetch agent").await?;
        Ok(agents.pop())
    }

    async fn update_system_prompt(&self, id: &AgentId, prompt: &str) -> Result<(), DomainError> {
        let body = PromptUpdate {
            system_prompt: prompt,
            updated_at: Timestamp::now(),
        };
        let request = self
            .client
            .patch(self.table_url())
            .query(&[("id", format!("eq.{}", id)), ("select", "id".to_string())])
            .header("Prefer", "return=representation")
            .json(&body);

        let response = self.send(request, "Failed to update system prompt").await?;
        let updated: Vec<serde_json::Value> = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to update system prompt: invalid response body: {}", e),
            )
        })?;

        if updated.is_empty() {
            return Err(DomainError::new(
                ErrorCode::AgentNotFound,
                format!("Agent not found: {}", id),
            ));
        }

        Ok(())
    }
}
