//! Error types for notes-core.

use thiserror::Error;

/// Result type alias using notes-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying notes or estimating workouts.
#[derive(Error, Debug)]
pub enum Error {
    /// Tag query resolved to zero tags after normalization
    #[error("No valid tags specified")]
    EmptyQuery,

    /// Pagination bounds out of range
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// Input argument violates the operation contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No note with the requested id
    #[error("Note with ID {id} not found")]
    NoteNotFound { id: String },

    /// Backing note collection could not be loaded
    #[error("Note repository unavailable at {path}: {message}")]
    RepositoryUnavailable { path: String, message: String },

    /// A stored record could not be interpreted as a note
    #[error("Malformed note: {0}")]
    MalformedNote(String),

    /// Primary duration strategy failed or is not configured
    #[error("Duration extraction degraded: {0}")]
    ExtractionDegraded(String),

    /// Timeout during operation
    #[error("Operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// LLM API error
    #[error("LLM API error: {provider} - {message}")]
    LlmApi { provider: String, message: String },

    /// LLM error (simple variant)
    #[error("LLM error: {0}")]
    LLM(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a repository unavailable error.
    pub fn repository_unavailable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RepositoryUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an LLM API error.
    pub fn llm_api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LlmApi {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a note not found error.
    pub fn note_not_found(id: impl Into<String>) -> Self {
        Self::NoteNotFound { id: id.into() }
    }

    /// Create a timeout error.
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }

    /// Whether this error is a caller-side contract violation rather than an
    /// internal failure.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuery
                | Self::InvalidPagination(_)
                | Self::InvalidArgument(_)
                | Self::NoteNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(Error::EmptyQuery.is_input_error());
        assert!(Error::InvalidPagination("limit".into()).is_input_error());
        assert!(Error::note_not_found("note_1").is_input_error());
        assert!(!Error::timeout(100).is_input_error());
        assert!(!Error::ExtractionDegraded("no key".into()).is_input_error());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::note_not_found("note_42").to_string(),
            "Note with ID note_42 not found"
        );
        assert_eq!(
            Error::timeout(1500).to_string(),
            "Operation timed out after 1500ms"
        );
        assert_eq!(
            Error::llm_api("openai", "rate limited").to_string(),
            "LLM API error: openai - rate limited"
        );
    }
}
