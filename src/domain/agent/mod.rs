//! Agent module - the storage row a system prompt is generated for.

mod record;
mod labels;

pub use labels::humanize;
pub use record::AgentRecord;
