//! Deterministic, regex-based duration extraction.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use super::{DurationSource, DurationStrategy};
use crate::error::Result;

/// One pattern for both unit families so matches can never overlap. Longer
/// unit spellings come first because alternation is leftmost-first.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?P<value>\d+(?:\.\d+)?)
        \s*
        (?P<unit>minutes|minute|mins|min|m|hours|hour|hrs|hr|h)
        \b
        ",
    )
    .unwrap()
});

fn is_hour_unit(unit: &str) -> bool {
    unit.starts_with('h')
}

/// Rounded whole minutes, or `None` when the value does not fit a `u32`.
fn whole_minutes(minutes: f64) -> Option<u32> {
    let rounded = minutes.round();
    (rounded.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&rounded))
        .then_some(rounded as u32)
}

/// Minutes contributed by one matched value. Unparsable or out-of-range
/// values give 0 so one absurd token cannot dominate the total.
///
/// A decimal minute value such as `2.5 min` is read as a whole number and
/// rounded (3), not truncated at the decimal point.
fn token_minutes(value: &str, unit: &str) -> u32 {
    let Ok(number) = value.parse::<f64>() else {
        return 0;
    };
    let minutes = if is_hour_unit(unit) {
        number * 60.0
    } else {
        number
    };
    whole_minutes(minutes).unwrap_or(0)
}

/// Sum every minute/hour mention in `text`, in minutes.
pub fn extract_minutes(text: &str) -> u32 {
    let lowered = text.to_lowercase();
    DURATION_RE
        .captures_iter(&lowered)
        .map(|caps| token_minutes(&caps["value"], &caps["unit"]))
        .fold(0u32, u32::saturating_add)
}

/// Fallback strategy that is always available and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexDurationStrategy;

impl RegexDurationStrategy {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> u32 {
        extract_minutes(text)
    }
}

#[async_trait]
impl DurationStrategy for RegexDurationStrategy {
    async fn estimate(&self, text: &str) -> Result<u32> {
        Ok(self.extract(text))
    }

    fn source(&self) -> DurationSource {
        DurationSource::Regex
    }
}
