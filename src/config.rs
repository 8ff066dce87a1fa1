//! Runtime configuration for the notes service.

use std::path::PathBuf;

/// Default location of the notes corpus.
pub const DEFAULT_NOTES_PATH: &str = "data/notes.json";

/// Default model used for duration extraction.
pub const DEFAULT_DURATION_MODEL: &str = "gpt-4o-mini";

/// Default look-back window for workout summaries.
pub const DEFAULT_PERIOD_DAYS: u32 = 30;

/// Configuration for [`NotesService`](crate::NotesService) and its collaborators.
#[derive(Debug, Clone)]
pub struct NotesConfig {
    /// Path to the JSON notes file.
    pub notes_path: PathBuf,
    /// Credential for the model-backed duration strategy. `None` disables it.
    pub openai_api_key: Option<String>,
    /// Base URL override for the model service.
    pub openai_base_url: Option<String>,
    /// Model used for duration extraction.
    pub duration_model: String,
    /// Upper bound on a single model call, in seconds.
    pub llm_timeout_secs: u64,
    /// Maximum concurrent per-note extractions.
    pub max_parallel: usize,
    /// Period used when a workout request omits `days`.
    pub default_period_days: u32,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            notes_path: PathBuf::from(DEFAULT_NOTES_PATH),
            openai_api_key: None,
            openai_base_url: None,
            duration_model: DEFAULT_DURATION_MODEL.to_string(),
            llm_timeout_secs: 20,
            max_parallel: 5,
            default_period_days: DEFAULT_PERIOD_DAYS,
        }
    }
}

impl NotesConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            notes_path: non_empty("NOTES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.notes_path),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_base_url: non_empty("OPENAI_BASE_URL"),
            duration_model: non_empty("NOTES_DURATION_MODEL").unwrap_or(defaults.duration_model),
            llm_timeout_secs: non_empty("NOTES_LLM_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.llm_timeout_secs),
            max_parallel: non_empty("NOTES_MAX_PARALLEL")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|n| *n >= 1)
                .unwrap_or(defaults.max_parallel),
            default_period_days: non_empty("NOTES_DEFAULT_DAYS")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|n| *n >= 1)
                .unwrap_or(defaults.default_period_days),
        }
    }

    pub fn with_notes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.notes_path = path.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = Some(url.into());
        self
    }

    pub fn with_duration_model(mut self, model: impl Into<String>) -> Self {
        self.duration_model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.llm_timeout_secs = secs;
        self
    }

    pub fn with_max_parallel(mut self, max: usize) -> Self {
        self.max_parallel = max.max(1);
        self
    }

    /// Whether the model-backed duration strategy can be used.
    pub fn has_model_credentials(&self) -> bool {
        self.openai_api_key.is_some()
    }
}
