//! prompt-seeder: regenerates the system prompts of one agent tier.
//!
//! Configuration comes from `PROMPT_SEEDER__*` environment variables (and a
//! `.env` file); command-line flags override the `batch` section.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use prompt_seeder::adapters::{
    connect_pool, PostgresAgentStore, SupabaseRestStore, SystemStampSource, TemplatePromptRenderer,
};
use prompt_seeder::application::{RegeneratePromptsCommand, RegeneratePromptsHandler};
use prompt_seeder::config::{AppConfig, LoggingConfig, StoreBackend};
use prompt_seeder::domain::foundation::Tier;
use prompt_seeder::domain::profile::ProfileCatalog;
use prompt_seeder::ports::{AgentStore, PromptVariant};

#[derive(Parser)]
#[command(name = "prompt-seeder")]
#[command(about = "Regenerate healthcare agent system prompts from the profile catalog")]
struct Cli {
    /// Agent tier to regenerate (1, 2 or 3)
    #[arg(long)]
    tier: Option<Tier>,

    /// Document layout: comprehensive or standard
    #[arg(long)]
    variant: Option<PromptVariant>,

    /// Profile catalog YAML file (defaults to the embedded catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Render every prompt without writing to the store
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt().with_env_filter(logging.env_filter());
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    // Apply CLI overrides
    if let Some(tier) = cli.tier {
        config.batch.tier = tier;
    }
    if let Some(variant) = cli.variant {
        config.batch.variant = variant;
    }
    if cli.catalog.is_some() {
        config.batch.catalog_path = cli.catalog;
    }
    config.batch.dry_run |= cli.dry_run;

    let catalog = match &config.batch.catalog_path {
        Some(path) => ProfileCatalog::from_path(path),
        None => ProfileCatalog::embedded(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "Failed to load profile catalog");
            return ExitCode::FAILURE;
        }
    };
    info!(profiles = catalog.len(), "Loaded profile catalog");

    let store: Arc<dyn AgentStore> = match config.store.backend {
        StoreBackend::Supabase => match SupabaseRestStore::new(&config.supabase) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                error!(error = %e, "Failed to create Supabase client");
                return ExitCode::FAILURE;
            }
        },
        StoreBackend::Postgres => match connect_pool(&config.database).await {
            Ok(pool) => Arc::new(PostgresAgentStore::new(pool)),
            Err(e) => {
                error!(error = %e, "Failed to connect to database");
                return ExitCode::FAILURE;
            }
        },
    };

    let handler = RegeneratePromptsHandler::new(
        store,
        Arc::new(catalog),
        Arc::new(TemplatePromptRenderer::new(config.batch.variant)),
        Arc::new(SystemStampSource),
    );

    let command = RegeneratePromptsCommand {
        tier: config.batch.tier,
        dry_run: config.batch.dry_run,
    };

    info!(
        backend = ?config.store.backend,
        variant = %config.batch.variant,
        "Starting prompt regeneration"
    );

    match handler.handle(command).await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Prompt regeneration aborted");
            ExitCode::FAILURE
        }
    }
}
