//! Note records and repositories.
//!
//! Notes are loaded through the [`NoteRepository`] trait. The JSON store keeps
//! the corpus as one array on disk; tags are resolved into [`TagEntry`] values
//! at load time regardless of whether a record stores them as `[name, weight]`
//! pairs or bare strings.
//!
//! ## Example
//!
//! ```rust,ignore
//! use notes_core::note::{JsonNoteRepository, NewNote, NoteRepository, TagEntry};
//!
//! let repo = JsonNoteRepository::new("data/notes.json");
//! let notes = repo.get_all().await;
//!
//! let created = repo
//!     .create(NewNote::new("Swim", "45 min laps").with_tag(TagEntry::legacy("swimming")))
//!     .await?;
//! ```

mod store;
mod types;

pub use store::{generate_note_id, InMemoryNoteRepository, JsonNoteRepository, NoteRepository};
pub use types::{NewNote, Note, NoteKind, TagEntry};
