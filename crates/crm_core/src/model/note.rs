//! Note entity.

use super::ids::{ContactId, NoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-text note, always attached to exactly one contact.
///
/// Notes are owned by their contact: deleting the contact deletes the note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub contact_id: ContactId,
    /// Assigned by the store on creation; updates never change it.
    pub created_at: DateTime<Utc>,
}

/// Creation payload for [`Note`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub content: String,
    pub contact_id: ContactId,
}
