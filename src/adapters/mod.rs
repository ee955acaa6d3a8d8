//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `supabase` - Agent store over the Supabase REST API
//! - `postgres` - Agent store over a direct PostgreSQL connection
//! - `memory` - In-memory agent store for tests and local runs
//! - `prompt` - Template-based prompt renderer and stamp sources

pub mod memory;
pub mod postgres;
pub mod prompt;
pub mod supabase;

pub use memory::InMemoryAgentStore;
pub use postgres::{connect_pool, PostgresAgentStore};
pub use prompt::{FixedStampSource, SystemStampSource, TemplatePromptRenderer};
pub use supabase::SupabaseRestStore;
