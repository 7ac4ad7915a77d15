//! The note store abstraction used by request handlers.

use async_trait::async_trait;
use notebox_core::note::ValidNote;
use notebox_core::search::NoteFilter;
use notebox_core::types::DbId;

use crate::models::note::Note;
use crate::repositories::NoteRepo;
use crate::DbPool;

/// Failure of the storage engine itself. "No such note" is not an error;
/// it is reported as an affected count of zero.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage for notes.
///
/// `update` and `delete` return the number of affected rows: `0` means no
/// note has the given id, `1` means the operation applied.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a validated note and return its newly assigned id.
    async fn insert(&self, note: &ValidNote) -> Result<DbId, StoreError>;

    /// Notes matching the filter, newest first, sliced to the filter's page.
    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, StoreError>;

    /// Replace title, description and category of the note with `id`.
    async fn update(&self, id: DbId, note: &ValidNote) -> Result<u64, StoreError>;

    /// Remove the note with `id`.
    async fn delete(&self, id: DbId) -> Result<u64, StoreError>;

    /// Check that the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// [`NoteStore`] backed by a SQLite pool.
#[derive(Clone)]
pub struct SqliteNoteStore {
    pool: DbPool,
}

impl SqliteNoteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl NoteStore for SqliteNoteStore {
    async fn insert(&self, note: &ValidNote) -> Result<DbId, StoreError> {
        let created = NoteRepo::create(&self.pool, note).await?;
        tracing::debug!(id = created.id, "Inserted note row");
        Ok(created.id)
    }

    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, StoreError> {
        Ok(NoteRepo::list(&self.pool, filter).await?)
    }

    async fn update(&self, id: DbId, note: &ValidNote) -> Result<u64, StoreError> {
        Ok(NoteRepo::update(&self.pool, id, note).await?)
    }

    async fn delete(&self, id: DbId) -> Result<u64, StoreError> {
        Ok(NoteRepo::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
