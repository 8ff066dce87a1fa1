//! Two-tier duration extraction: model first, regex fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::model::ModelDurationStrategy;
use super::pattern::RegexDurationStrategy;
use super::{DurationEstimate, DurationSource, DurationStrategy};
use crate::config::NotesConfig;
use crate::error::{Error, Result};
use crate::llm::{ClientConfig, OpenAIClient};

/// Estimates workout minutes from free text.
///
/// The primary strategy is optional. Any failure from it, including not being
/// configured at all, falls through to [`RegexDurationStrategy`], so
/// extraction itself never fails.
pub struct DurationExtractor {
    primary: Option<Arc<dyn DurationStrategy>>,
    fallback: RegexDurationStrategy,
}

impl DurationExtractor {
    /// Extractor that only uses the regex strategy.
    pub fn regex_only() -> Self {
        Self {
            primary: None,
            fallback: RegexDurationStrategy::new(),
        }
    }

    /// Extractor with a primary strategy in front of the regex fallback.
    pub fn with_primary(primary: Arc<dyn DurationStrategy>) -> Self {
        Self {
            primary: Some(primary),
            fallback: RegexDurationStrategy::new(),
        }
    }

    /// Build from configuration. Without a model credential, or if the HTTP
    /// client cannot be built, the extractor is regex-only.
    pub fn from_config(config: &NotesConfig) -> Self {
        let Some(api_key) = config.openai_api_key.as_deref() else {
            debug!("No model credential configured, using regex duration extraction");
            return Self::regex_only();
        };

        let mut client_config = ClientConfig::new(api_key)
            .with_default_model(&config.duration_model)
            .with_timeout(config.llm_timeout_secs);
        if let Some(base_url) = &config.openai_base_url {
            client_config = client_config.with_base_url(base_url);
        }

        match OpenAIClient::new(client_config) {
            Ok(client) => {
                let strategy = ModelDurationStrategy::new(Arc::new(client))
                    .with_model(&config.duration_model)
                    .with_timeout(Duration::from_secs(config.llm_timeout_secs));
                Self::with_primary(Arc::new(strategy))
            }
            Err(e) => {
                warn!(error = %e, "Model client unavailable, using regex duration extraction");
                Self::regex_only()
            }
        }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    async fn try_primary(&self, text: &str) -> Result<u32> {
        match &self.primary {
            Some(strategy) => strategy.estimate(text).await,
            None => Err(Error::ExtractionDegraded(
                "no primary strategy configured".to_string(),
            )),
        }
    }

    /// Estimate minutes for one note, reporting which strategy answered.
    pub async fn extract(&self, note_id: &str, text: &str) -> DurationEstimate {
        let (minutes, source) = match self.try_primary(text).await {
            Ok(minutes) => (minutes, self.primary_source()),
            Err(e) => {
                if self.has_primary() {
                    warn!(note_id, error = %e, "Primary duration strategy failed, falling back");
                }
                (self.fallback.extract(text), DurationSource::Regex)
            }
        };

        debug!(note_id, minutes, ?source, "Estimated duration");
        DurationEstimate {
            note_id: note_id.to_string(),
            minutes,
            source,
        }
    }

    /// Estimate minutes for free text. Never fails; empty text gives 0.
    pub async fn extract_minutes(&self, text: &str) -> u32 {
        self.extract("", text).await.minutes
    }

    fn primary_source(&self) -> DurationSource {
        self.primary
            .as_ref()
            .map(|s| s.source())
            .unwrap_or(DurationSource::Regex)
    }
}

impl Default for DurationExtractor {
    fn default() -> Self {
        Self::regex_only()
    }
}
