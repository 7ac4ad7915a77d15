//! Note entity model.

use notebox_core::note::Category;
use notebox_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
