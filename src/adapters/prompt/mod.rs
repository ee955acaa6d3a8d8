//! Prompt adapters - document rendering and render stamps.

pub mod sections;
mod stamp;
mod template_renderer;

pub use stamp::{FixedStampSource, SystemStampSource};
pub use template_renderer::{fingerprint, TemplatePromptRenderer, METADATA_HEADER};
