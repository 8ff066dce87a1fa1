//! # notes-core
//!
//! Tag-based retrieval over a personal notes corpus, plus workout-hours
//! aggregation driven by duration extraction from free-text notes.
//!
//! ## Core Components
//!
//! - **Note**: Note records, tag entries, and repositories
//! - **Tags**: Normalized tag queries with all/any matching
//! - **Duration**: Model-first duration extraction with a regex fallback
//! - **Workout**: Fitness-note selection and period aggregation
//! - **Analysis**: Volume totals and suggestions for a logged session
//! - **Service**: Request/response operations for a transport layer
//!
//! ## Example
//!
//! ```rust,ignore
//! use notes_core::{NotesConfig, NotesService, TagQueryRequest, WorkoutHoursRequest};
//!
//! let service = NotesService::from_config(&NotesConfig::from_env());
//!
//! let cardio = service.notes_by_tag(TagQueryRequest::new("cardio,running")).await?;
//! println!("{} cardio notes", cardio.meta.total);
//!
//! let report = service.calculate_workout_hours(WorkoutHoursRequest::days(7)).await?;
//! println!("{} hours this week", report.total.hours);
//! ```

pub mod analysis;
pub mod config;
pub mod duration;
pub mod error;
pub mod llm;
pub mod note;
pub mod service;
pub mod tags;
pub mod workout;

// Re-exports for convenience
pub use analysis::{analyze_workout, Exercise, WorkoutAnalysis, WorkoutSession};
pub use config::NotesConfig;
pub use duration::{
    DurationEstimate, DurationExtractor, DurationSource, DurationStrategy, ModelDurationStrategy,
    RegexDurationStrategy,
};
pub use error::{Error, Result};
pub use llm::{ClientConfig, LLMClient, OpenAIClient};
pub use note::{
    InMemoryNoteRepository, JsonNoteRepository, NewNote, Note, NoteKind, NoteRepository, TagEntry,
};
pub use service::{
    ListNotesMeta, ListNotesRequest, ListNotesResponse, NotesService, TagQueryMeta,
    TagQueryRequest, TagQueryResponse, WorkoutAnalysisRequest, WorkoutHoursRequest,
    WorkoutReport,
};
pub use tags::{normalize_tag, MatchMode, TagQuery};
pub use workout::{is_fitness_note, WorkoutAggregator, WorkoutEntry, WorkoutSummary, FITNESS_TAGS};
