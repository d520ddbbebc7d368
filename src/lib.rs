//! DigitalWorkforce Profile Intelligence Backend
//!
//! Profile completion analysis for the gig marketplace:
//! - Weighted completion scoring with missing-field detection
//! - Next-question suggestions for the AI onboarding chat
//! - Greeting and prompt composition by completion bracket
//! - Text normalization for free-text chat answers

pub mod api;
pub mod profile;

pub use api::*;
pub use profile::*;
