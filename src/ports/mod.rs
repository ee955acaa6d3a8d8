//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AgentStore` - Reads agent rows and writes rendered prompts back
//! - `PromptRenderer` - Renders a prompt document from an agent and its profile
//! - `StampSource` - Supplies the generation timestamp and document identifier

mod agent_store;
mod prompt_renderer;
mod stamp_source;

pub use agent_store::AgentStore;
pub use prompt_renderer::{PromptRenderer, PromptVariant, RenderError, RenderStamp};
pub use stamp_source::StampSource;
