//! Note repositories: a JSON-file store and an in-memory store.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::note::types::{NewNote, Note};

/// Read access (plus append-only create) over a collection of notes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Load every note. Fails with [`Error::RepositoryUnavailable`] when the
    /// backing store cannot be read.
    async fn load(&self) -> Result<Vec<Note>>;

    /// Append a new note, assigning its id and timestamps.
    async fn create(&self, note: NewNote) -> Result<Note>;

    /// Load every note, recovering from an unavailable store with an empty
    /// collection.
    async fn get_all(&self) -> Vec<Note> {
        match self.load().await {
            Ok(notes) => notes,
            Err(e) => {
                warn!(error = %e, "Note repository unavailable, using empty corpus");
                Vec::new()
            }
        }
    }

    /// Find a note by id.
    async fn get(&self, id: &str) -> Option<Note> {
        self.get_all().await.into_iter().find(|n| n.id == id)
    }
}

/// Generate a note id of the form `note_<unix millis>_<9 chars>`.
pub fn generate_note_id(now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("note_{}_{}", now.timestamp_millis(), suffix)
}

/// Parse stored records, skipping any that cannot be read as a note.
fn parse_records(records: Vec<Value>) -> Vec<Note> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            if !record.is_object() {
                let e = Error::MalformedNote(format!("record {} is not an object", index));
                warn!(error = %e, "Skipping note record");
                return None;
            }
            match serde_json::from_value::<Note>(record) {
                Ok(note) => Some(note),
                Err(err) => {
                    let e = Error::MalformedNote(format!("record {}: {}", index, err));
                    warn!(error = %e, "Skipping note record");
                    None
                }
            }
        })
        .collect()
}

/// Notes persisted as a single JSON array on disk.
///
/// `create` rewrites the whole file. Writers inside one process are
/// serialized; concurrent writers in different processes can lose updates.
pub struct JsonNoteRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonNoteRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn unavailable(&self, message: impl Into<String>) -> Error {
        Error::repository_unavailable(self.path.display().to_string(), message)
    }

    /// Raw records, or `None` when the file does not exist.
    async fn read_records(&self) -> Result<Option<Vec<Value>>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.unavailable(e.to_string())),
        };

        if data.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }

        let records: Vec<Value> = serde_json::from_str(&data)
            .map_err(|e| self.unavailable(format!("invalid notes file: {}", e)))?;
        Ok(Some(records))
    }

    async fn write_records(&self, records: &[Value]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let data = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for JsonNoteRepository {
    async fn load(&self) -> Result<Vec<Note>> {
        debug!(path = %self.path.display(), "Loading notes");
        let records = self
            .read_records()
            .await?
            .ok_or_else(|| self.unavailable("notes file does not exist"))?;

        let notes = parse_records(records);
        debug!(count = notes.len(), "Loaded notes");
        Ok(notes)
    }

    async fn create(&self, note: NewNote) -> Result<Note> {
        let _guard = self.write_lock.lock().await;

        // Existing records are kept as raw JSON so unknown fields survive.
        let mut records = self.read_records().await?.unwrap_or_default();

        let now = Utc::now();
        let note = note.into_note(generate_note_id(now), now);
        records.push(serde_json::to_value(&note)?);
        self.write_records(&records).await?;

        info!(note_id = %note.id, path = %self.path.display(), "Created note");
        Ok(note)
    }
}

/// Notes held in memory. Useful for tests and for embedding a fixed corpus.
#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: RwLock<Vec<Note>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: RwLock::new(notes),
        }
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn load(&self) -> Result<Vec<Note>> {
        Ok(self.notes.read().await.clone())
    }

    async fn create(&self, note: NewNote) -> Result<Note> {
        let now = Utc::now();
        let note = note.into_note(generate_note_id(now), now);
        self.notes.write().await.push(note.clone());
        Ok(note)
    }
}
