//! Repository for the `notes` table.

use chrono::Utc;
use notebox_core::note::ValidNote;
use notebox_core::search::{escape_like, NoteCondition, NoteFilter};
use notebox_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::note::Note;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, created_at, updated_at";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new note, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &ValidNote) -> Result<Note, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO notes (title, description, category, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category.as_str())
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a note by its ID.
    ///
    /// No HTTP route reads a single note; this backs store tests and
    /// post-write checks.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = ?");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List notes matching every condition in `filter`, newest first.
    ///
    /// Ties on `created_at` are broken by descending id so paging is stable.
    pub async fn list(pool: &SqlitePool, filter: &NoteFilter) -> Result<Vec<Note>, sqlx::Error> {
        let conditions: Vec<&str> = filter
            .conditions
            .iter()
            .map(|condition| match condition {
                NoteCondition::TitleContains(_) => "title LIKE ? ESCAPE '\\'",
                NoteCondition::CategoryIs(_) => "category = ?",
            })
            .collect();

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM notes \
             {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ? OFFSET ?"
        );

        let mut q = sqlx::query_as::<_, Note>(&query);

        // Bind dynamic parameters in the same order as the clauses.
        for condition in &filter.conditions {
            q = match condition {
                NoteCondition::TitleContains(text) => q.bind(format!("%{}%", escape_like(text))),
                NoteCondition::CategoryIs(category) => q.bind(category.as_str()),
            };
        }

        q.bind(filter.page.limit)
            .bind(filter.page.offset())
            .fetch_all(pool)
            .await
    }

    /// Replace the content fields of a note and refresh `updated_at`.
    ///
    /// Returns the number of rows changed (0 when no note has that id).
    pub async fn update(pool: &SqlitePool, id: DbId, input: &ValidNote) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notes SET \
                title = ?, \
                description = ?, \
                category = ?, \
                updated_at = ? \
             WHERE id = ?",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.category.as_str())
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a note. Returns the number of rows removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count all notes.
    ///
    /// Used by tests to assert that rejected writes persisted nothing.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
