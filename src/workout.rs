//! Workout-hours aggregation over fitness notes.
//!
//! Notes are selected by tag against a fixed fitness vocabulary, each note's
//! text is handed to the [`DurationExtractor`], and the per-note minutes are
//! reduced into period totals and averages.
//!
//! The period window is descriptive: notes are not filtered by timestamp, so
//! every fitness note in the corpus counts toward the totals.

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::duration::{DurationEstimate, DurationExtractor, DurationSource};
use crate::error::{Error, Result};
use crate::note::Note;
use crate::tags::{matches, MatchMode};

/// Tags that mark a note as workout-relevant.
pub const FITNESS_TAGS: &[&str] = &[
    "fitness", "workout", "exercise", "training", "gym", "cardio", "strength", "yoga", "running",
    "jogging", "walking", "swimming", "cycling",
];

static FITNESS_VOCABULARY: LazyLock<BTreeSet<String>> =
    LazyLock::new(|| FITNESS_TAGS.iter().map(|t| t.to_string()).collect());

/// Default maximum concurrent duration extractions.
pub const DEFAULT_MAX_PARALLEL: usize = 5;

/// Whether a note carries any fitness tag.
pub fn is_fitness_note(note: &Note) -> bool {
    matches(&note.tags, &FITNESS_VOCABULARY, MatchMode::Any)
}

/// Per-note line of a workout summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub note_id: String,
    pub name: String,
    pub minutes: u32,
    pub source: DurationSource,
    pub raw: Option<String>,
}

/// Aggregate workout statistics for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub total_minutes: u64,
    pub total_hours: f64,
    pub workout_count: usize,
    pub average_minutes_per_day: f64,
    pub average_hours_per_week: f64,
    pub period_days: u32,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    /// Notes that fed the totals.
    pub notes_analyzed: usize,
    /// Notes carrying a fitness tag. Equal to `notes_analyzed` while notes are
    /// not filtered by date.
    pub fitness_notes_found: usize,
    pub workouts: Vec<WorkoutEntry>,
}

/// Combines tag selection and duration extraction into workout summaries.
pub struct WorkoutAggregator {
    extractor: Arc<DurationExtractor>,
    max_parallel: usize,
}

impl WorkoutAggregator {
    pub fn new(extractor: Arc<DurationExtractor>) -> Self {
        Self {
            extractor,
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }

    pub fn with_max_parallel(mut self, max: usize) -> Self {
        self.max_parallel = max.max(1);
        self
    }

    /// Summarize workouts over the `period_days` ending now.
    pub async fn summarize(&self, notes: &[Note], period_days: u32) -> Result<WorkoutSummary> {
        self.summarize_at(notes, period_days, Utc::now()).await
    }

    /// Summarize workouts over the `period_days` ending at `now`.
    pub async fn summarize_at(
        &self,
        notes: &[Note],
        period_days: u32,
        now: DateTime<Utc>,
    ) -> Result<WorkoutSummary> {
        if period_days == 0 {
            return Err(Error::InvalidArgument("period days must be greater than 0".to_string()));
        }
        let period_start = Duration::try_days(i64::from(period_days))
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "a period of {} days reaches before the earliest representable date",
                    period_days
                ))
            })?;

        let fitness_notes: Vec<&Note> = notes.iter().filter(|n| is_fitness_note(n)).collect();
        debug!(
            total = notes.len(),
            fitness = fitness_notes.len(),
            "Selected fitness notes"
        );

        let estimates = self.estimate_all(&fitness_notes).await;

        let workouts: Vec<WorkoutEntry> = fitness_notes
            .iter()
            .zip(estimates)
            .map(|(note, estimate)| WorkoutEntry {
                note_id: estimate.note_id,
                name: note.display_name().to_string(),
                minutes: estimate.minutes,
                source: estimate.source,
                raw: note.raw.clone(),
            })
            .collect();

        let total_minutes: u64 = workouts.iter().map(|w| u64::from(w.minutes)).sum();
        let total_hours = total_minutes as f64 / 60.0;
        let days = f64::from(period_days);

        let summary = WorkoutSummary {
            total_minutes,
            total_hours,
            workout_count: workouts.len(),
            average_minutes_per_day: total_minutes as f64 / days,
            average_hours_per_week: total_hours * 7.0 / days,
            period_days,
            period_start,
            period_end: now,
            notes_analyzed: workouts.len(),
            fitness_notes_found: fitness_notes.len(),
            workouts,
        };

        info!(
            workouts = summary.workout_count,
            total_minutes = summary.total_minutes,
            period_days,
            "Summarized workouts"
        );
        Ok(summary)
    }

    /// Run extraction for every note, at most `max_parallel` at a time.
    /// Results are in input order.
    async fn estimate_all(&self, notes: &[&Note]) -> Vec<DurationEstimate> {
        let semaphore = Arc::new(Semaphore::new(self.max_parallel));

        let tasks = notes.iter().map(|note| {
            let semaphore = Arc::clone(&semaphore);
            let extractor = Arc::clone(&self.extractor);
            async move {
                // The semaphore is never closed, so acquire only fails if it is.
                let _permit = semaphore.acquire().await.ok();
                extractor.extract(&note.id, note.analysis_text()).await
            }
        });

        join_all(tasks).await
    }
}
