//! Supabase configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Supabase PostgREST configuration, used by the `supabase` store backend
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Service-role key sent as `apikey` and bearer token
    #[serde(default)]
    pub service_key: String,

    /// Table holding agent records
    #[serde(default = "default_table")]
    pub table: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SupabaseConfig {
    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Supabase configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE__URL"));
        }
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ValidationError::InvalidSupabaseUrl);
        }
        if self.service_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE__SERVICE_KEY"));
        }
        let valid_table = !self.table.is_empty()
            && self
                .table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_table {
            return Err(ValidationError::InvalidTableName(self.table.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            service_key: String::new(),
            table: default_table(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_table() -> String {
    "agents".to_string()
}

fn default_timeout() -> u64 {
    30
}
