//! Batch run configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::foundation::Tier;
use crate::ports::PromptVariant;

/// Defaults for a regeneration run; CLI flags override them
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Tier of agents to regenerate
    #[serde(default = "default_tier")]
    pub tier: Tier,

    /// Prompt layout to render
    #[serde(default)]
    pub variant: PromptVariant,

    /// Catalog file; the embedded catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Render and report without writing
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            tier: default_tier(),
            variant: PromptVariant::default(),
            catalog_path: None,
            dry_run: false,
        }
    }
}

fn default_tier() -> Tier {
    Tier::One
}
