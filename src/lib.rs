//! Prompt Seeder - System prompt generation for healthcare agents
//!
//! Resolves a profile for every agent of a tier (from a declarative catalog,
//! or synthesized from the agent's capability tags), renders a sectioned
//! system prompt document, and writes it back to the agent store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
