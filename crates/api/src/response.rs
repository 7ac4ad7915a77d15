//! Response bodies for the notes API.

use notebox_core::note::{Category, ValidNote};
use notebox_core::types::DbId;
use notebox_db::models::note::Note;
use serde::Serialize;

/// Body of a successful `POST /notes`: the normalized note plus its new id.
#[derive(Debug, Serialize)]
pub struct CreatedNote {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: Category,
}

impl CreatedNote {
    pub fn new(id: DbId, note: ValidNote) -> Self {
        Self {
            id,
            title: note.title,
            description: note.description,
            category: note.category,
        }
    }
}

/// Body of `GET /notes`. Page and limit are the effective (clamped) values.
#[derive(Debug, Serialize)]
pub struct NoteListResponse {
    pub page: i64,
    pub limit: i64,
    pub notes: Vec<Note>,
}

/// `{ "message": ... }` acknowledgement for update and delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
