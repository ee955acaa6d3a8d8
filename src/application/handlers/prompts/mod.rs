//! Prompt handlers - batch regeneration of agent system prompts.

mod regenerate_prompts;

pub use regenerate_prompts::{
    AgentUpdateError, FailedUpdate, RegeneratePromptsCommand, RegeneratePromptsError,
    RegeneratePromptsHandler, UpdateReport, VerificationOutcome,
};
