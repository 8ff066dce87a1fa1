//! Tag normalization and matching.
//!
//! Tag names are compared after trimming and lower-casing on both sides, so
//! `" Cardio"` and `"cardio"` are the same logical tag and duplicate names on a
//! note collapse into one.
//!
//! ## Example
//!
//! ```rust,ignore
//! use notes_core::tags::{MatchMode, TagQuery};
//!
//! let query = TagQuery::parse("Cardio,%20Strength", MatchMode::Any)?;
//! let hits: Vec<_> = notes.iter().filter(|n| query.matches(&n.tags)).collect();
//! ```

#[cfg(test)]
mod proptest;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::note::TagEntry;

/// How a multi-tag query combines its tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every query tag must be present.
    All,
    /// At least one query tag must be present.
    #[default]
    Any,
}

/// Canonical form of a tag name.
pub fn normalize_tag(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A validated, normalized tag query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagQuery {
    tags: BTreeSet<String>,
    mode: MatchMode,
}

impl TagQuery {
    /// Parse a comma-joined, possibly URL-encoded tag parameter.
    ///
    /// Returns [`Error::EmptyQuery`] if nothing survives normalization.
    pub fn parse(raw: &str, mode: MatchMode) -> Result<Self> {
        let decoded = urlencoding::decode(raw)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        Self::from_tags(decoded.split(','), mode)
    }

    /// Build a query from individual tag names.
    pub fn from_tags<I, S>(tags: I, mode: MatchMode) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags: BTreeSet<String> = tags
            .into_iter()
            .map(|t| normalize_tag(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();

        if tags.is_empty() {
            return Err(Error::EmptyQuery);
        }
        Ok(Self { tags, mode })
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn matches(&self, note_tags: &[TagEntry]) -> bool {
        matches(note_tags, &self.tags, self.mode)
    }
}

/// Whether a note's tags satisfy a set of query tags.
///
/// Query tags are normalized here as well, so callers may pass raw names. An
/// empty query set matches nothing; [`TagQuery`] rejects that case up front.
pub fn matches(note_tags: &[TagEntry], query_tags: &BTreeSet<String>, mode: MatchMode) -> bool {
    let note_names: BTreeSet<String> = note_tags.iter().map(|t| normalize_tag(t.name())).collect();
    if note_names.is_empty() {
        return false;
    }

    let mut wanted = query_tags
        .iter()
        .map(|t| normalize_tag(t))
        .filter(|t| !t.is_empty())
        .peekable();
    if wanted.peek().is_none() {
        return false;
    }

    match mode {
        MatchMode::All => wanted.all(|t| note_names.contains(&t)),
        MatchMode::Any => wanted.any(|t| note_names.contains(&t)),
    }
}
