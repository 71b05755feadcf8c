//! Transcript Entity
//!
//! The ordered, append-only record of one interactive session.
//! Only the final explanation of each exchange is recorded; intermediate
//! reasoning output never enters the transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single exchange record in a session transcript
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
    /// When the entry was appended
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only conversation record for one session.
///
/// Entries are only ever appended during a session; the single exception
/// is [`Transcript::clear`], which empties the record unconditionally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user entry
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::user(text));
    }

    /// Append an assistant entry
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::assistant(text));
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Text of the most recent assistant entry, if any
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.role == Role::Assistant)
            .map(|e| e.text.as_str())
    }

    /// Empty the transcript, regardless of prior contents
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
