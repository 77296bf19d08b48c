//! Async translation client for the MyMemory-style GET endpoint

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{LanguagePair, ProviderResponse};

/// Single-attempt translation client.
///
/// Cloning is cheap and shares the underlying connection pool. Concurrent
/// calls are independent; nothing orders their completion.
#[derive(Debug, Clone)]
pub struct Translator {
    client: reqwest::Client,
    config: Arc<TranslatorConfig>,
    endpoint: Url,
}

impl Translator {
    /// Create a new translator
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate().map_err(|e| TranslationError::Config {
            message: e.to_string(),
        })?;

        let endpoint = Url::parse(&config.api_endpoint).map_err(|e| TranslationError::Config {
            message: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Some(Duration::from_secs(30)));
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build().map_err(|e| TranslationError::Config {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            config: Arc::new(config),
            endpoint,
        })
    }

    /// Language pair sent with every request
    pub fn language_pair(&self) -> &LanguagePair {
        &self.config.language_pair
    }

    /// URL requested for `text`, with `q` and `langpair` percent-encoded
    pub fn request_url(&self, text: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", text)
            .append_pair("langpair", &self.config.language_pair.to_string());
        url
    }

    /// Translate `text`.
    ///
    /// Empty input makes no request and yields `Ok(None)`.
    pub async fn translate(&self, text: &str) -> Result<Option<String>> {
        if text.is_empty() {
            debug!("Empty input, skipping translation");
            return Ok(None);
        }

        let url = self.request_url(text);
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TranslationError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslationError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TranslationError::Network {
                message: e.to_string(),
            })?;

        let translation = parse_response(&body)?;
        info!(
            "Translated {} chars ({})",
            text.chars().count(),
            self.config.language_pair
        );

        Ok(Some(translation))
    }
}

/// Extract the translated string from a provider body
fn parse_response(body: &[u8]) -> Result<String> {
    let parsed: ProviderResponse =
        serde_json::from_slice(body).map_err(|e| TranslationError::Decode {
            message: e.to_string(),
        })?;

    let translation = parsed.response_data.translated_text;
    if translation.is_empty() {
        return Err(TranslationError::Decode {
            message: "No translation in response".to_string(),
        });
    }

    Ok(translation)
}
