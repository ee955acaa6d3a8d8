//! Store backend selection

use serde::Deserialize;

/// Which `AgentStore` implementation the batch runs against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Supabase PostgREST API
    #[default]
    Supabase,
    /// Direct PostgreSQL connection
    Postgres,
}

/// Store configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
}
