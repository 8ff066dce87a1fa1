//! Workout duration extraction from free text.
//!
//! Two interchangeable [`DurationStrategy`] implementations:
//!
//! - [`ModelDurationStrategy`]: asks a language model to sum every duration
//!   mentioned in the text
//! - [`RegexDurationStrategy`]: deterministic minute/hour pattern matching
//!
//! [`DurationExtractor`] chains them. The model is only consulted when one is
//! configured, and any failure from it falls back to the regex strategy.
//!
//! ## Example
//!
//! ```rust,ignore
//! use notes_core::duration::DurationExtractor;
//!
//! let extractor = DurationExtractor::regex_only();
//! assert_eq!(extractor.extract_minutes("30 min cardio + 20 min strength").await, 50);
//! ```

mod extractor;
mod model;
mod pattern;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use extractor::DurationExtractor;
pub use model::{
    parse_minutes_reply, ModelDurationStrategy, DEFAULT_MODEL_TIMEOUT, DURATION_INSTRUCTION,
};
pub use pattern::{extract_minutes, RegexDurationStrategy};

/// Which strategy produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationSource {
    Llm,
    Regex,
}

/// Minutes estimated for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationEstimate {
    pub note_id: String,
    pub minutes: u32,
    pub source: DurationSource,
}

/// An algorithm that estimates workout minutes from text.
#[async_trait]
pub trait DurationStrategy: Send + Sync {
    /// Estimated total minutes mentioned in `text`.
    async fn estimate(&self, text: &str) -> Result<u32>;

    /// Source tag reported alongside this strategy's estimates.
    fn source(&self) -> DurationSource;
}
