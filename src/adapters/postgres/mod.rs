//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! - `PostgresAgentStore` - Direct SQL access to the `agents` table

mod agent_store;

pub use agent_store::{connect_pool, PostgresAgentStore};
