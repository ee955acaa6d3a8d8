//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `PROMPT_SEEDER` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use prompt_seeder::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Regenerating tier {}", config.batch.tier);
//! ```

mod batch;
mod database;
mod error;
mod logging;
mod store;
mod supabase;

pub use batch::BatchConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use store::{StoreBackend, StoreConfig};
pub use supabase::SupabaseConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Only the section of the selected store backend is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend selection
    #[serde(default)]
    pub store: StoreConfig,

    /// Supabase REST settings (supabase backend)
    #[serde(default)]
    pub supabase: SupabaseConfig,

    /// PostgreSQL settings (postgres backend)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Run defaults
    #[serde(default)]
    pub batch: BatchConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `PROMPT_SEEDER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PROMPT_SEEDER__SUPABASE__URL=...` -> `supabase.url = ...`
    /// - `PROMPT_SEEDER__BATCH__TIER=2` -> `batch.tier = 2`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PROMPT_SEEDER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate the sections the selected backend needs
    ///
    /// Credentials are never defaulted; a missing URL or key is reported
    /// as `MissingRequired`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any required value is absent or malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.store.backend {
            StoreBackend::Supabase => self.supabase.validate()?,
            StoreBackend::Postgres => self.database.validate()?,
        }
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Tier;
    use crate::ports::PromptVariant;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PROMPT_SEEDER__STORE__BACKEND",
        "PROMPT_SEEDER__SUPABASE__URL",
        "PROMPT_SEEDER__SUPABASE__SERVICE_KEY",
        "PROMPT_SEEDER__SUPABASE__TABLE",
        "PROMPT_SEEDER__DATABASE__URL",
        "PROMPT_SEEDER__BATCH__TIER",
        "PROMPT_SEEDER__BATCH__VARIANT",
        "PROMPT_SEEDER__BATCH__DRY_RUN",
    ];

    fn set_supabase_env() {
        env::set_var("PROMPT_SEEDER__SUPABASE__URL", "https://project.supabase.co");
        env::set_var("PROMPT_SEEDER__SUPABASE__SERVICE_KEY", "service-role-key");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_supabase_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.store.backend, StoreBackend::Supabase);
        assert_eq!(config.supabase.url, "https://project.supabase.co");
        assert_eq!(config.supabase.table, "agents");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_batch_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_supabase_env();
        env::set_var("PROMPT_SEEDER__BATCH__TIER", "2");
        env::set_var("PROMPT_SEEDER__BATCH__VARIANT", "standard");
        env::set_var("PROMPT_SEEDER__BATCH__DRY_RUN", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.batch.tier, Tier::Two);
        assert_eq!(config.batch.variant, PromptVariant::Standard);
        assert!(config.batch.dry_run);
    }

    #[test]
    fn test_missing_credentials_fail_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("SUPABASE__URL"))
        );
    }

    #[test]
    fn test_postgres_backend_requires_database_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_supabase_env();
        env::set_var("PROMPT_SEEDER__STORE__BACKEND", "postgres");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.store.backend, StoreBackend::Postgres);
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
    }

    #[test]
    fn test_postgres_backend_ignores_supabase_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PROMPT_SEEDER__STORE__BACKEND", "postgres");
        env::set_var("PROMPT_SEEDER__DATABASE__URL", "postgresql://localhost/agents");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }
}
