//! Model-backed duration extraction.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{DurationSource, DurationStrategy};
use crate::error::{Error, Result};
use crate::llm::{ChatMessage, CompletionRequest, LLMClient};

/// System instruction sent with every extraction request.
pub const DURATION_INSTRUCTION: &str = "You read informal training notes and report how long the \
activity took. Find every duration of exercise or physical activity written in minutes or hours \
(for example \"30 min\", \"45 minutes\", \"1.5h\", \"2 hrs\", \"1 hour\") anywhere in the \
text and add them together. Reply with one integer: the total number of minutes, and nothing \
else. Reply 0 if the text mentions no duration. Examples: \"30 min cardio + 20 min strength\" \
-> 50, \"1.5h yoga session\" -> 90.";

/// Default upper bound on one extraction call.
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(20);

/// Interpret a model reply as a minute count.
///
/// The leading run of ASCII digits is used, so `"50"` and `"50 minutes"` both
/// give 50. Replies without leading digits are rejected.
pub fn parse_minutes_reply(reply: &str) -> Result<u32> {
    let trimmed = reply.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        let preview: String = trimmed.chars().take(40).collect();
        return Err(Error::ExtractionDegraded(format!(
            "non-numeric model reply: {:?}",
            preview
        )));
    }

    digits
        .parse::<u32>()
        .map_err(|e| Error::ExtractionDegraded(format!("model reply out of range: {}", e)))
}

/// Asks a language model for the summed duration.
pub struct ModelDurationStrategy {
    client: Arc<dyn LLMClient>,
    model: Option<String>,
    timeout: Duration,
}

impl ModelDurationStrategy {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self {
            client,
            model: None,
            timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request(&self, text: &str) -> CompletionRequest {
        let mut request = CompletionRequest::new()
            .with_system(DURATION_INSTRUCTION)
            .with_message(ChatMessage::user(text))
            .with_temperature(0.1)
            .with_max_tokens(16);
        if let Some(model) = &self.model {
            request = request.with_model(model);
        }
        request
    }
}

#[async_trait]
impl DurationStrategy for ModelDurationStrategy {
    async fn estimate(&self, text: &str) -> Result<u32> {
        if text.trim().is_empty() {
            return Ok(0);
        }

        let request = self.build_request(text);
        let response = tokio::time::timeout(self.timeout, self.client.complete(request))
            .await
            .map_err(|_| Error::timeout(self.timeout.as_millis() as u64))??;

        let minutes = parse_minutes_reply(&response.content)?;
        debug!(
            provider = self.client.provider(),
            model = %response.model,
            minutes,
            "Model duration estimate"
        );
        Ok(minutes)
    }

    fn source(&self) -> DurationSource {
        DurationSource::Llm
    }
}
