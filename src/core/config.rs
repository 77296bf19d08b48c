//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::models::LanguagePair;

/// Default MyMemory endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Storage slot the history blob is kept under
pub const DEFAULT_HISTORY_SLOT: &str = "translationHistory";

/// Configuration for translator and history. Missing keys in a config
/// file fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub api_endpoint: String,
    pub language_pair: LanguagePair,
    pub timeout_ms: Option<u64>,
    pub history_dir: Option<PathBuf>,
    pub history_slot: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            language_pair: LanguagePair::default(),
            timeout_ms: None,
            history_dir: None,
            history_slot: DEFAULT_HISTORY_SLOT.to_string(),
        }
    }
}

impl TranslatorConfig {
    /// Override fields with values found through `lookup`
    pub fn with_lookup<F>(self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self;

        if let Some(endpoint) = lookup("TRANSLATE_ENDPOINT") {
            config.api_endpoint = endpoint;
        }

        if let Some(pair) = lookup("TRANSLATE_LANGPAIR") {
            config.language_pair = pair
                .parse()
                .map_err(|e| anyhow::anyhow!("TRANSLATE_LANGPAIR: {}", e))?;
        }

        if let Some(timeout) = lookup("TRANSLATE_TIMEOUT_MS") {
            config.timeout_ms = Some(timeout.parse::<u64>()?);
        }

        if let Some(dir) = lookup("TRANSLATE_HISTORY_DIR") {
            config.history_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        let endpoint = url::Url::parse(&self.api_endpoint)
            .map_err(|e| anyhow::anyhow!("Invalid API endpoint {}: {}", self.api_endpoint, e))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "API endpoint must be http or https, got {}",
                self.api_endpoint
            ));
        }

        if self.timeout_ms == Some(0) {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        if self.history_slot.is_empty() {
            return Err(anyhow::anyhow!("history slot name is required"));
        }

        Ok(())
    }

    /// Directory holding the history slot
    pub fn history_dir(&self) -> PathBuf {
        match &self.history_dir {
            Some(dir) => dir.clone(),
            None => {
                let dir = dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(env!("CARGO_PKG_NAME"));
                info!("Using default history directory {}", dir.display());
                dir
            }
        }
    }
}
