//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over ports.

pub mod prompts;

pub use prompts::{
    FailedUpdate, RegeneratePromptsCommand, RegeneratePromptsError, RegeneratePromptsHandler,
    UpdateReport, VerificationOutcome,
};
