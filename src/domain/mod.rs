//! Domain layer containing the pure model of prompt generation.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, enums, timestamps, errors)
//! - `agent` - The agent row a prompt is generated for
//! - `profile` - Structured per-agent configuration, catalog and synthesizer

pub mod agent;
pub mod foundation;
pub mod profile;
