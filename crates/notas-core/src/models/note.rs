//! Note model

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote service when a note is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A note as confirmed by the remote service.
///
/// Serializes to the service's wire shape
/// (`{id, titulo, descripcion, completada}`). Every field is required when
/// decoding, so a partial server payload is rejected instead of cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(rename = "titulo")]
    pub title: String,
    /// HTML body produced by the rich-text editor
    #[serde(rename = "descripcion")]
    pub body: String,
    #[serde(rename = "completada")]
    pub completed: bool,
}

impl Note {
    /// Apply a server-confirmed representation of this note.
    ///
    /// The id never changes once assigned.
    pub fn merge(&mut self, confirmed: Self) {
        debug_assert_eq!(self.id, confirmed.id);
        self.title = confirmed.title;
        self.body = confirmed.body;
        self.completed = confirmed.completed;
    }

    /// Plain-text preview of the HTML body, truncated to `max_len` characters
    #[must_use]
    pub fn body_preview(&self, max_len: usize) -> String {
        strip_html(&self.body)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(max_len)
            .collect()
    }
}

/// Create payload. `completada` is always sent, and always `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub body: String,
    #[serde(rename = "completada")]
    completed: bool,
}

impl NewNote {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            completed: false,
        }
    }
}

/// Partial update. Only the fields that are `Some` go on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteChanges {
    #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "completada", skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl NoteChanges {
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.completed.is_none()
    }
}

/// Remove HTML tags and decode the handful of entities the editor emits.
#[must_use]
pub fn strip_html(html: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    let re = TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));
    re.replace_all(html, " ")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
