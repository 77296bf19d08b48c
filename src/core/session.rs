//! Translate-and-record workflow: idle -> translating -> success | failure

use tracing::warn;

use crate::core::client::Translator;
use crate::core::history::HistoryStore;
use crate::core::models::TranslationRecord;

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Input was empty, nothing happened
    Skipped,
    /// Provider answered; the record is now the history head
    Translated(TranslationRecord),
    /// Provider call failed; carries the displayed message
    Failed(String),
}

/// Owns the translator, the history and the currently displayed text
#[derive(Debug)]
pub struct TranslateSession {
    translator: Translator,
    history: HistoryStore,
    displayed: String,
}

impl TranslateSession {
    pub fn new(translator: Translator, history: HistoryStore) -> Self {
        Self {
            translator,
            history,
            displayed: String::new(),
        }
    }

    /// Translate `text` and record it on success
    pub async fn submit(&mut self, text: &str) -> Outcome {
        match self.translator.translate(text).await {
            Ok(Some(translated)) => {
                let record = TranslationRecord::new(text, translated);
                self.displayed = record.translated().to_string();
                self.history.prepend(record.clone());
                Outcome::Translated(record)
            }
            Ok(None) => Outcome::Skipped,
            Err(e) => {
                warn!("Translation failed: {}", e);
                self.displayed = format!("Error: {}", e);
                Outcome::Failed(self.displayed.clone())
            }
        }
    }

    /// Text shown for the last submission
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }
}
