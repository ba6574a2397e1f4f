// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod collection;
pub mod prompt;

pub use collection::{CollectionCount, CollectionOutcome, EnsureOutcome, InitReport, SeedOutcome};
pub use prompt::SystemPrompt;
