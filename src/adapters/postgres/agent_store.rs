//! PostgreSQL implementation of AgentStore.
//!
//! Reads and writes the `agents` table directly.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::config::DatabaseConfig;
use crate::domain::agent::AgentRecord;
use crate::domain::foundation::{AgentId, AgentStatus, DomainError, ErrorCode, Tier};
use crate::ports::AgentStore;

const AGENT_COLUMNS: &str =
    "id, name, display_name, capabilities, metadata, status, tier, system_prompt";

/// Opens a connection pool sized from configuration.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(config.pool_size)
        .acquire_timeout(config.connect_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to connect to database: {}", e),
            )
        })
}

/// PostgreSQL implementation of AgentStore.
#[derive(Clone)]
pub struct PostgresAgentStore {
    pool: PgPool,
}

impl PostgresAgentStore {
    /// Creates a new PostgresAgentStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentStore for PostgresAgentStore {
    async fn list_by_tier(&self, tier: Tier) -> Result<Vec<AgentRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM agents WHERE tier = $1 ORDER BY name",
            AGENT_COLUMNS
        ))
        .bind(tier.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch agents for tier {}: {}", tier, e),
            )
        })?;

        tracing::debug!(tier = %tier, rows = rows.len(), "Fetched agents");

        rows.into_iter().map(row_to_agent).collect()
    }

    async fn find_by_id(&self, id: &AgentId) -> Result<Option<AgentRecord>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM agents WHERE id = $1", AGENT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch agent: {}", e),
                )
            })?;

        row.map(row_to_agent).transpose()
    }

    async fn update_system_prompt(&self, id: &AgentId, prompt: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE agents SET
                system_prompt = $2,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(prompt)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update system prompt: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AgentNotFound,
                format!("Agent not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

fn metadata_from_json(value: Option<Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn row_to_agent(row: sqlx::postgres::PgRow) -> Result<AgentRecord, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let name: String = row.try_get("name").map_err(|e| column_error("name", e))?;
    let display_name: Option<String> = row
        .try_get("display_name")
        .map_err(|e| column_error("display_name", e))?;
    let capabilities: Option<Vec<String>> = row
        .try_get("capabilities")
        .map_err(|e| column_error("capabilities", e))?;
    let metadata: Option<Value> = row
        .try_get("metadata")
        .map_err(|e| column_error("metadata", e))?;
    let status: Option<String> = row.try_get("status").map_err(|e| column_error("status", e))?;
    let tier: i32 = row.try_get("tier").map_err(|e| column_error("tier", e))?;
    let system_prompt: Option<String> = row
        .try_get("system_prompt")
        .map_err(|e| column_error("system_prompt", e))?;

    let tier = Tier::try_from(tier as i64).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid tier for agent {}: {}", name, e),
        )
    })?;

    Ok(AgentRecord {
        id: AgentId::from_uuid(id),
        name,
        display_name,
        capabilities: capabilities.unwrap_or_default(),
        metadata: metadata_from_json(metadata),
        status: status
            .as_deref()
            .map(AgentStatus::from_column)
            .unwrap_or_default(),
        tier,
        system_prompt,
    })
}
