use crate::data::ids::{new_id, now_timestamp};
use crate::data::persistence::Persistable;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Stored under `notes`, newest first.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
#[serde(transparent)]
pub struct NoteData {
    pub notes: Vec<Note>,
}

impl Persistable for NoteData {
    fn key() -> &'static str {
        "notes"
    }
}

#[derive(Clone, Debug, Default)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

impl NoteInput {
    pub fn validate(self) -> Result<Note, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        Ok(Note {
            id: new_id(),
            title: title.to_string(),
            content: self.content,
            created_at: now_timestamp(),
        })
    }
}

impl NoteData {
    pub fn add(&mut self, note: Note) {
        self.notes.insert(0, note);
    }

    /// Returns false when no note has that id.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != before
    }
}
