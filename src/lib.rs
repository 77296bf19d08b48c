//! translate-me - translate text through a MyMemory-style HTTP API and keep
//! a locally persisted, most-recent-first history of the results.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use crate::core::{
    client::Translator,
    config::TranslatorConfig,
    errors::{PersistenceError, TranslationError},
    history::HistoryStore,
    models::{LanguagePair, TranslationRecord},
    session::{Outcome, TranslateSession},
    storage::{FileStorage, HistoryStorage, MemoryStorage},
};

