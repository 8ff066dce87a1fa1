//! Operation contracts exposed to a transport layer.
//!
//! Each operation takes a plain request value and returns a serializable
//! response, so a server can map them onto resources or tools without
//! knowing how notes are stored or how durations are estimated.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{analyze_workout, WorkoutAnalysis, WorkoutSession};
use crate::config::NotesConfig;
use crate::duration::DurationExtractor;
use crate::error::{Error, Result};
use crate::note::{JsonNoteRepository, NewNote, Note, NoteKind, NoteRepository};
use crate::tags::{MatchMode, TagQuery};
use crate::workout::{WorkoutAggregator, WorkoutSummary};

/// Default page size for paginated listings.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Largest page size a listing may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Validate optional `limit`/`offset` inputs into a `(limit, offset)` pair.
fn resolve_page(limit: Option<i64>, offset: Option<i64>) -> Result<(usize, usize)> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(Error::InvalidPagination(format!(
            "limit must be between 1 and {}, got {}",
            MAX_PAGE_LIMIT, limit
        )));
    }
    let offset = offset.unwrap_or(0);
    if offset < 0 {
        return Err(Error::InvalidPagination(format!(
            "offset must not be negative, got {}",
            offset
        )));
    }
    let offset = usize::try_from(offset)
        .map_err(|_| Error::InvalidPagination(format!("offset {} is too large", offset)))?;
    Ok((limit as usize, offset))
}

/// Input of the note listing operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNotesRequest {
    /// Case-insensitive substring matched against the note's text fields.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl ListNotesRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Trimmed search term, `None` when absent or blank.
    fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Pagination metadata of a note listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNotesMeta {
    /// Matches before pagination.
    pub total: usize,
    /// Notes in this page.
    pub count: usize,
    pub search: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

/// Output of the note listing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListNotesResponse {
    pub data: Vec<Note>,
    pub meta: ListNotesMeta,
}

/// Input of the tag query operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagQueryRequest {
    /// Comma-joined, possibly URL-encoded tag names.
    pub tag: String,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub mode: Option<MatchMode>,
}

impl TagQueryRequest {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = Some(mode);
        self
    }

    fn page(&self) -> Result<(usize, usize)> {
        resolve_page(self.limit, self.offset)
    }
}

/// Pagination metadata of a tag query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagQueryMeta {
    /// Matches before pagination.
    pub total: usize,
    /// Notes in this page.
    pub count: usize,
    /// Normalized query tags.
    pub tags: Vec<String>,
    pub limit: usize,
    pub offset: usize,
}

/// Output of the tag query operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagQueryResponse {
    pub data: Vec<Note>,
    pub meta: TagQueryMeta,
}

/// Input of the workout-hours operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutHoursRequest {
    #[serde(default)]
    pub days: Option<u32>,
}

impl WorkoutHoursRequest {
    pub fn days(days: u32) -> Self {
        Self { days: Some(days) }
    }
}

/// Input of the workout analysis operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutAnalysisRequest {
    pub workout_data: WorkoutSession,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub minutes: u64,
    pub hours: f64,
    pub workouts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAverages {
    pub minutes_per_day: f64,
    pub hours_per_week: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub days: u32,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportWorkout {
    pub name: String,
    /// Minutes
    pub duration: u32,
    pub raw: Option<String>,
}

/// Serialized shape of a [`WorkoutSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutReport {
    pub total: ReportTotals,
    pub average: ReportAverages,
    pub period: ReportPeriod,
    pub notes_analyzed: usize,
    pub fitness_notes_found: usize,
    pub workouts: Vec<ReportWorkout>,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

impl From<&WorkoutSummary> for WorkoutReport {
    fn from(summary: &WorkoutSummary) -> Self {
        Self {
            total: ReportTotals {
                minutes: summary.total_minutes,
                hours: round_to(summary.total_hours, 2),
                workouts: summary.workout_count,
            },
            average: ReportAverages {
                minutes_per_day: round_to(summary.average_minutes_per_day, 1),
                hours_per_week: round_to(summary.average_hours_per_week, 1),
            },
            period: ReportPeriod {
                days: summary.period_days,
                start_date: summary.period_start.format("%Y-%m-%d").to_string(),
                end_date: summary.period_end.format("%Y-%m-%d").to_string(),
            },
            notes_analyzed: summary.notes_analyzed,
            fitness_notes_found: summary.fitness_notes_found,
            workouts: summary
                .workouts
                .iter()
                .map(|w| ReportWorkout {
                    name: w.name.clone(),
                    duration: w.minutes,
                    raw: w.raw.clone(),
                })
                .collect(),
        }
    }
}

/// Notes operations over a repository and a duration extractor.
pub struct NotesService {
    repository: Arc<dyn NoteRepository>,
    aggregator: WorkoutAggregator,
    default_period_days: u32,
}

impl NotesService {
    pub fn new(repository: Arc<dyn NoteRepository>, extractor: Arc<DurationExtractor>) -> Self {
        Self {
            repository,
            aggregator: WorkoutAggregator::new(extractor),
            default_period_days: crate::config::DEFAULT_PERIOD_DAYS,
        }
    }

    /// JSON-file repository and extractor built from `config`.
    pub fn from_config(config: &NotesConfig) -> Self {
        let repository = Arc::new(JsonNoteRepository::new(&config.notes_path));
        let extractor = Arc::new(DurationExtractor::from_config(config));

        Self {
            repository,
            aggregator: WorkoutAggregator::new(extractor).with_max_parallel(config.max_parallel),
            default_period_days: config.default_period_days.max(1),
        }
    }

    pub fn with_default_period_days(mut self, days: u32) -> Self {
        self.default_period_days = days.max(1);
        self
    }

    /// Notes in corpus order, optionally narrowed by a text search, then
    /// paginated. An unavailable store yields no notes.
    pub async fn list_notes(&self, request: ListNotesRequest) -> Result<ListNotesResponse> {
        let (limit, offset) = resolve_page(request.limit, request.offset)?;
        let search = request.search_term().map(str::to_string);

        let mut notes = self.repository.get_all().await;
        if let Some(term) = &search {
            let needle = term.to_lowercase();
            notes.retain(|n| n.contains_text(&needle));
        }
        let total = notes.len();

        let data: Vec<Note> = notes.into_iter().skip(offset).take(limit).collect();
        debug!(search = ?search, total, returned = data.len(), "Listed notes");

        Ok(ListNotesResponse {
            meta: ListNotesMeta {
                total,
                count: data.len(),
                search,
                limit,
                offset,
            },
            data,
        })
    }

    /// Notes of one category, in corpus order.
    pub async fn notes_by_kind(&self, kind: NoteKind) -> Vec<Note> {
        self.repository
            .get_all()
            .await
            .into_iter()
            .filter(|n| n.kind == kind)
            .collect()
    }

    pub async fn get_note(&self, id: &str) -> Result<Note> {
        self.repository
            .get(id)
            .await
            .ok_or_else(|| Error::note_not_found(id))
    }

    /// Notes matching the requested tags, paginated in corpus order.
    pub async fn notes_by_tag(&self, request: TagQueryRequest) -> Result<TagQueryResponse> {
        let query = TagQuery::parse(&request.tag, request.mode.unwrap_or_default())?;
        let (limit, offset) = request.page()?;

        let matching: Vec<Note> = self
            .repository
            .get_all()
            .await
            .into_iter()
            .filter(|n| query.matches(&n.tags))
            .collect();
        let total = matching.len();

        let data: Vec<Note> = matching.into_iter().skip(offset).take(limit).collect();
        debug!(
            tags = ?query.tags(),
            mode = ?query.mode(),
            total,
            returned = data.len(),
            "Tag query"
        );

        Ok(TagQueryResponse {
            meta: TagQueryMeta {
                total,
                count: data.len(),
                tags: query.tags().iter().cloned().collect(),
                limit,
                offset,
            },
            data,
        })
    }

    pub async fn create_note(&self, note: NewNote) -> Result<Note> {
        self.repository.create(note).await
    }

    pub async fn workout_summary(&self, days: Option<u32>) -> Result<WorkoutSummary> {
        let days = days.unwrap_or(self.default_period_days);
        let notes = self.repository.get_all().await;
        self.aggregator.summarize(&notes, days).await
    }

    /// Total and average workout time over the requested period.
    pub async fn calculate_workout_hours(
        &self,
        request: WorkoutHoursRequest,
    ) -> Result<WorkoutReport> {
        let summary = self.workout_summary(request.days).await?;
        Ok(WorkoutReport::from(&summary))
    }

    /// Volume totals, insights and suggestions for one logged session.
    pub fn analyze_workout(&self, request: WorkoutAnalysisRequest) -> Result<WorkoutAnalysis> {
        analyze_workout(&request.workout_data)
    }

    /// Analyze the session stored in a note's `metadata`. A session without a
    /// date takes the note's creation date.
    pub async fn analyze_workout_note(&self, id: &str) -> Result<WorkoutAnalysis> {
        let note = self.get_note(id).await?;
        let metadata = note.metadata.clone().ok_or_else(|| {
            Error::InvalidArgument(format!("note {} has no workout data", id))
        })?;

        let mut session: WorkoutSession = serde_json::from_value(metadata).map_err(|e| {
            Error::InvalidArgument(format!("note {} has no usable workout data: {}", id, e))
        })?;
        if session.date.is_none() {
            session.date = note.created_at.map(|t| t.format("%Y-%m-%d").to_string());
        }

        analyze_workout(&session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Exercise;
    use crate::duration::DurationSource;
    use crate::note::{InMemoryNoteRepository, TagEntry};
    use crate::workout::WorkoutEntry;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn service_with(notes: Vec<Note>) -> NotesService {
        NotesService::new(
            Arc::new(InMemoryNoteRepository::with_notes(notes)),
            Arc::new(DurationExtractor::regex_only()),
        )
    }

    fn sample_notes() -> Vec<Note> {
        vec![
            Note::new("n1", "Intervals")
                .with_content("30 min cardio + 20 min strength")
                .with_tag("cardio", 5.0),
            Note::new("n2", "Lifting")
                .with_content("1 hour gym")
                .with_tag("strength", 3.0)
                .with_tag("gym", 1.0),
            Note::new("n3", "Journal")
                .with_content("slept 8 h")
                .with_tag("personal", 1.0),
            Note::new("n4", "Stretch")
                .with_raw("0.5h yoga")
                .with_tags(vec![TagEntry::legacy("Yoga"), TagEntry::legacy("cardio")]),
        ]
    }

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_tag_query_any_mode() {
        let service = service_with(sample_notes());
        let response = service
            .notes_by_tag(TagQueryRequest::new("Cardio,%20Strength"))
            .await
            .unwrap();

        assert_eq!(ids(&response.data), vec!["n1", "n2", "n4"]);
        assert_eq!(
            response.meta,
            TagQueryMeta {
                total: 3,
                count: 3,
                tags: vec!["cardio".to_string(), "strength".to_string()],
                limit: 10,
                offset: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_tag_query_all_mode() {
        let service = service_with(sample_notes());
        let response = service
            .notes_by_tag(TagQueryRequest::new("gym, STRENGTH").with_mode(MatchMode::All))
            .await
            .unwrap();
        assert_eq!(ids(&response.data), vec!["n2"]);
    }

    #[tokio::test]
    async fn test_tag_query_pagination() {
        let service = service_with(sample_notes());
        let response = service
            .notes_by_tag(TagQueryRequest::new("cardio,strength").with_limit(1).with_offset(1))
            .await
            .unwrap();

        assert_eq!(ids(&response.data), vec!["n2"]);
        assert_eq!(response.meta.total, 3);
        assert_eq!(response.meta.count, 1);

        let past_end = service
            .notes_by_tag(TagQueryRequest::new("cardio").with_offset(50))
            .await
            .unwrap();
        assert!(past_end.data.is_empty());
        assert_eq!(past_end.meta.total, 2);
    }

    #[tokio::test]
    async fn test_tag_query_rejects_bad_input() {
        let service = service_with(sample_notes());

        let err = service.notes_by_tag(TagQueryRequest::new("")).await.unwrap_err();
        assert!(matches!(err, Error::EmptyQuery));

        let err = service
            .notes_by_tag(TagQueryRequest::new("cardio").with_limit(0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPagination(_)));

        let err = service
            .notes_by_tag(TagQueryRequest::new("cardio").with_limit(101))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPagination(_)));

        let err = service
            .notes_by_tag(TagQueryRequest::new("cardio").with_offset(-1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPagination(_)));
    }

    #[tokio::test]
    async fn test_tag_query_request_from_json() {
        let request: TagQueryRequest =
            serde_json::from_value(json!({"tag": "yoga", "limit": 5, "mode": "all"})).unwrap();
        assert_eq!(request.limit, Some(5));
        assert_eq!(request.mode, Some(MatchMode::All));

        let response = service_with(sample_notes()).notes_by_tag(request).await.unwrap();
        assert_eq!(ids(&response.data), vec!["n4"]);
    }

    #[tokio::test]
    async fn test_list_notes_defaults() {
        let response = service_with(sample_notes())
            .list_notes(ListNotesRequest::new())
            .await
            .unwrap();

        assert_eq!(ids(&response.data), vec!["n1", "n2", "n3", "n4"]);
        assert_eq!(
            response.meta,
            ListNotesMeta {
                total: 4,
                count: 4,
                search: None,
                limit: 10,
                offset: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_list_notes_search_and_pagination() {
        let service = service_with(sample_notes());

        let response = service
            .list_notes(ListNotesRequest::new().with_search(" GYM "))
            .await
            .unwrap();
        assert_eq!(ids(&response.data), vec!["n2"]);
        assert_eq!(response.meta.search.as_deref(), Some("GYM"));

        let response = service
            .list_notes(ListNotesRequest::new().with_search("Yoga"))
            .await
            .unwrap();
        assert_eq!(ids(&response.data), vec!["n4"]);

        let response = service
            .list_notes(ListNotesRequest::new().with_search("   "))
            .await
            .unwrap();
        assert_eq!(response.meta.total, 4);
        assert!(response.meta.search.is_none());

        let page = service
            .list_notes(ListNotesRequest::new().with_limit(2).with_offset(2))
            .await
            .unwrap();
        assert_eq!(ids(&page.data), vec!["n3", "n4"]);
        assert_eq!(page.meta.total, 4);
        assert_eq!(page.meta.count, 2);
    }

    #[tokio::test]
    async fn test_list_notes_rejects_bad_pagination() {
        let service = service_with(sample_notes());

        for request in [
            ListNotesRequest::new().with_limit(0),
            ListNotesRequest::new().with_limit(101),
            ListNotesRequest::new().with_offset(-3),
        ] {
            let err = service.list_notes(request).await.unwrap_err();
            assert!(matches!(err, Error::InvalidPagination(_)));
        }
    }

    #[tokio::test]
    async fn test_notes_by_kind() {
        let service = service_with(vec![
            Note::new("w1", "Legs").with_kind(NoteKind::Workout),
            Note::new("g1", "Ideas"),
            Note::new("f1", "Lunch").with_kind(NoteKind::Nutrition),
            Note::new("w2", "Swim").with_kind(NoteKind::Workout),
        ]);

        assert_eq!(ids(&service.notes_by_kind(NoteKind::Workout).await), vec!["w1", "w2"]);
        assert_eq!(ids(&service.notes_by_kind(NoteKind::Nutrition).await), vec!["f1"]);
        assert_eq!(ids(&service.notes_by_kind(NoteKind::General).await), vec!["g1"]);
    }

    #[test]
    fn test_analyze_workout_request() {
        let request: WorkoutAnalysisRequest = serde_json::from_value(json!({
            "workoutData": {
                "exercises": [
                    {"name": "Squat", "sets": 3, "reps": [10, 10, 10], "weight": [100, 100, 100]}
                ],
                "duration": 40,
                "date": "2024-06-01"
            }
        }))
        .unwrap();

        let analysis = service_with(Vec::new()).analyze_workout(request).unwrap();
        assert_eq!(analysis.summary.total_reps, 30);
        assert_eq!(analysis.summary.total_weight, 300.0);
        assert_eq!(analysis.next_workout.target_duration, 50);
    }

    #[tokio::test]
    async fn test_analyze_workout_note() {
        let session = WorkoutSession::new(
            vec![Exercise::new("Row", vec![12, 12]).with_weight(vec![40.0, 40.0])],
            30,
        );
        let mut stored = Note::new("w1", "Back day").with_kind(NoteKind::Workout);
        stored.metadata = Some(serde_json::to_value(&session).unwrap());
        stored.created_at = Some(Utc.with_ymd_and_hms(2024, 6, 2, 7, 0, 0).unwrap());
        let mut no_data = Note::new("w2", "Forgot to log");
        no_data.metadata = Some(json!({"mood": "tired"}));

        let service = service_with(vec![stored, no_data, Note::new("g1", "Ideas")]);

        let analysis = service.analyze_workout_note("w1").await.unwrap();
        assert_eq!(analysis.summary.total_sets, 2);
        assert_eq!(analysis.summary.total_weight, 80.0);

        assert!(matches!(
            service.analyze_workout_note("w2").await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            service.analyze_workout_note("g1").await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            service.analyze_workout_note("missing").await,
            Err(Error::NoteNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_workout_hours_rejects_unrepresentable_period() {
        let err = service_with(sample_notes())
            .calculate_workout_hours(WorkoutHoursRequest::days(u32::MAX))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_get_note() {
        let service = service_with(sample_notes());
        assert_eq!(service.get_note("n3").await.unwrap().title, "Journal");
        assert!(matches!(
            service.get_note("missing").await,
            Err(Error::NoteNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_calculate_workout_hours_report() {
        let service = service_with(sample_notes());
        let report = service
            .calculate_workout_hours(WorkoutHoursRequest::days(7))
            .await
            .unwrap();

        // n1 50 + n2 60 + n4 30
        assert_eq!(report.total.minutes, 140);
        assert_eq!(report.total.hours, 2.33);
        assert_eq!(report.total.workouts, 3);
        assert_eq!(report.average.minutes_per_day, 20.0);
        assert_eq!(report.average.hours_per_week, 2.3);
        assert_eq!(report.period.days, 7);
        assert_eq!(report.notes_analyzed, 3);
        assert_eq!(report.fitness_notes_found, 3);
        assert_eq!(report.workouts[2].raw.as_deref(), Some("0.5h yoga"));
    }

    #[tokio::test]
    async fn test_workout_hours_defaults_and_rejects_zero() {
        let service = service_with(Vec::new()).with_default_period_days(14);
        let report = service
            .calculate_workout_hours(WorkoutHoursRequest::default())
            .await
            .unwrap();
        assert_eq!(report.period.days, 14);
        assert_eq!(report.total.minutes, 0);
        assert_eq!(report.total.workouts, 0);

        let err = service
            .calculate_workout_hours(WorkoutHoursRequest::days(0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_report_json_shape() {
        let summary = WorkoutSummary {
            total_minutes: 90,
            total_hours: 1.5,
            workout_count: 1,
            average_minutes_per_day: 3.0,
            average_hours_per_week: 0.25,
            period_days: 30,
            period_start: Utc.with_ymd_and_hms(2024, 5, 31, 8, 0, 0).unwrap(),
            period_end: Utc.with_ymd_and_hms(2024, 6, 30, 8, 0, 0).unwrap(),
            notes_analyzed: 1,
            fitness_notes_found: 1,
            workouts: vec![WorkoutEntry {
                note_id: "n1".to_string(),
                name: "Yoga".to_string(),
                minutes: 90,
                source: DurationSource::Regex,
                raw: None,
            }],
        };

        let value = serde_json::to_value(WorkoutReport::from(&summary)).unwrap();
        assert_eq!(
            value,
            json!({
                "total": {"minutes": 90, "hours": 1.5, "workouts": 1},
                "average": {"minutesPerDay": 3.0, "hoursPerWeek": 0.3},
                "period": {"days": 30, "startDate": "2024-05-31", "endDate": "2024-06-30"},
                "notesAnalyzed": 1,
                "fitnessNotesFound": 1,
                "workouts": [{"name": "Yoga", "duration": 90, "raw": null}]
            })
        );
    }

    #[tokio::test]
    async fn test_from_config_with_json_store() {
        let dir = TempDir::new().unwrap();
        let config = NotesConfig::default().with_notes_path(dir.path().join("notes.json"));
        let service = NotesService::from_config(&config);

        // No file yet: reads recover to empty
        assert_eq!(
            service.list_notes(ListNotesRequest::new()).await.unwrap().meta.total,
            0
        );
        let report = service
            .calculate_workout_hours(WorkoutHoursRequest::default())
            .await
            .unwrap();
        assert_eq!(report.period.days, 30);
        assert_eq!(report.total.minutes, 0);

        let created = service
            .create_note(
                NewNote::new("Bike", "Rode 2 hrs along the river")
                    .with_tag(TagEntry::legacy("Cycling")),
            )
            .await
            .unwrap();

        assert_eq!(service.get_note(&created.id).await.unwrap().title, "Bike");
        let by_tag = service
            .notes_by_tag(TagQueryRequest::new("cycling"))
            .await
            .unwrap();
        assert_eq!(by_tag.meta.total, 1);

        let report = service
            .calculate_workout_hours(WorkoutHoursRequest::days(30))
            .await
            .unwrap();
        assert_eq!(report.total.minutes, 120);
        assert_eq!(report.workouts[0].name, "Bike");
    }
}
