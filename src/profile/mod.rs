//! Profile Module - Core of the DigitalWorkforce Profile Intelligence
//!
//! Everything needed to score a worker profile and drive the AI onboarding
//! chat toward filling it in:
//! - Types: the loosely-shaped profile document model
//! - Analyzer: weighted completion scoring, missing fields, priority
//! - Prompts: greetings and AI-prompt context by completion bracket
//! - Text: normalization helpers for free-text chat answers
//! - Store: SQLite persistence for profiles and activity events

pub mod analyzer;
pub mod prompts;
pub mod store;
pub mod text;
pub mod types;

pub use analyzer::*;
pub use prompts::*;
pub use store::*;
pub use text::*;
pub use types::*;
