//! Note records and their tag representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single tag attached to a note.
///
/// Stored notes carry tags either as `[name, weight]` pairs or, in older
/// records, as bare strings. Both forms are resolved into this type once on
/// load so comparison sites never inspect raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagEntry {
    /// `[name, weight]` pair. The weight is opaque to the core.
    Weighted(String, f64),
    /// Bare tag name from a legacy record.
    Legacy(String),
}

impl TagEntry {
    pub fn weighted(name: impl Into<String>, weight: f64) -> Self {
        Self::Weighted(name.into(), weight)
    }

    pub fn legacy(name: impl Into<String>) -> Self {
        Self::Legacy(name.into())
    }

    /// Tag name as stored (not normalized).
    pub fn name(&self) -> &str {
        match self {
            Self::Weighted(name, _) | Self::Legacy(name) => name,
        }
    }

    /// Convert to the weighted form used for newly persisted notes.
    pub fn into_weighted(self) -> Self {
        match self {
            Self::Legacy(name) => Self::Weighted(name, 0.0),
            weighted => weighted,
        }
    }

    /// Interpret one raw tag element. Returns `None` for shapes that carry no
    /// usable tag name.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self::Legacy(name.clone())),
            Value::Number(n) => Some(Self::Legacy(n.to_string())),
            Value::Array(items) => {
                let name = match items.first()? {
                    Value::String(name) => name.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return None,
                };
                let weight = items.get(1).and_then(Value::as_f64).unwrap_or(0.0);
                Some(Self::Weighted(name, weight))
            }
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for TagEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported tag entry: {}", value)))
    }
}

/// Tag list deserializer: anything that is not an array yields no tags and
/// unusable elements are dropped.
fn lenient_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<TagEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(TagEntry::from_value).collect(),
        _ => Vec::new(),
    })
}

fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_kind<'de, D>(deserializer: D) -> std::result::Result<NoteKind, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value.as_ref().and_then(Value::as_str) {
        Some("workout") => NoteKind::Workout,
        Some("nutrition") => NoteKind::Nutrition,
        _ => NoteKind::General,
    })
}

/// Category of a note. Unknown categories load as `General`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Workout,
    Nutrition,
    #[default]
    General,
}

/// A note record as persisted in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Display name used by imported records instead of `title`.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<TagEntry>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: NoteKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Unprocessed source text, when the note was imported.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
}

impl Note {
    /// Create a note with the given id and title and no other content.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            name: None,
            content: String::new(),
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
            kind: NoteKind::General,
            metadata: None,
            raw: None,
            summary: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, weight: f64) -> Self {
        self.tags.push(TagEntry::weighted(name, weight));
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagEntry>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_kind(mut self, kind: NoteKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Title for display: `title`, or `name` when the title is blank.
    pub fn display_name(&self) -> &str {
        if self.title.trim().is_empty() {
            self.name.as_deref().unwrap_or("")
        } else {
            &self.title
        }
    }

    /// Case-insensitive substring search over the note's text fields
    /// (`title`, `name`, `content`, `raw`, `summary`). `needle` must already
    /// be lower-cased.
    pub fn contains_text(&self, needle: &str) -> bool {
        [
            Some(self.title.as_str()),
            self.name.as_deref(),
            Some(self.content.as_str()),
            self.raw.as_deref(),
            self.summary.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }

    /// Text used for duration estimation: the first non-blank of `raw`,
    /// `content`, `summary`, then the display name.
    pub fn analysis_text(&self) -> &str {
        [
            self.raw.as_deref(),
            Some(self.content.as_str()),
            self.summary.as_deref(),
            Some(self.display_name()),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("")
    }
}

/// Input for creating a note. The repository assigns id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: NoteKind,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<TagEntry>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: NoteKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_tag(mut self, tag: TagEntry) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Materialize into a stored note. Tags are normalized to weighted pairs.
    pub fn into_note(self, id: String, now: DateTime<Utc>) -> Note {
        Note {
            id,
            title: self.title,
            name: None,
            content: self.content,
            tags: self.tags.into_iter().map(TagEntry::into_weighted).collect(),
            created_at: Some(now),
            updated_at: Some(now),
            kind: self.kind,
            metadata: self.metadata,
            raw: None,
            summary: None,
        }
    }
}
