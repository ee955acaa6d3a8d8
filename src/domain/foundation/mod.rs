//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the prompt seeder domain.

mod agent_status;
mod errors;
mod ids;
mod tier;
mod timestamp;

pub use agent_status::AgentStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::AgentId;
pub use tier::Tier;
pub use timestamp::Timestamp;
