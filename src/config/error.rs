//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid Supabase URL format")]
    InvalidSupabaseUrl,

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("Database pool size must be between 1 and 16, got {0}")]
    InvalidPoolSize(u32),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
