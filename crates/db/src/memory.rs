//! In-process [`NoteStore`] with the same ordering, filtering and
//! affected-count semantics as the SQLite store.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use notebox_core::note::ValidNote;
use notebox_core::search::NoteFilter;
use notebox_core::types::DbId;
use tokio::sync::Mutex;

use crate::models::note::Note;
use crate::store::{NoteStore, StoreError};

#[derive(Default)]
struct Inner {
    /// Last id handed out; ids are never reused, even after deletes.
    last_id: DbId,
    notes: Vec<Note>,
}

/// Note store held entirely in memory.
///
/// [`MemoryNoteStore::set_unavailable`] makes every operation fail with
/// [`StoreError::Unavailable`], which lets callers exercise storage-failure
/// paths.
#[derive(Default)]
pub struct MemoryNoteStore {
    inner: Mutex<Inner>,
    unavailable: AtomicBool,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of notes currently stored.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.notes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn insert(&self, note: &ValidNote) -> Result<DbId, StoreError> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let now = Utc::now();
        let id = inner.last_id;
        inner.notes.push(Note {
            id,
            title: note.title.clone(),
            description: note.description.clone(),
            category: note.category,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, StoreError> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        let mut matching: Vec<Note> = inner
            .notes
            .iter()
            .filter(|n| filter.matches(&n.title, n.category))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(filter.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.page.limit).unwrap_or(0);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn update(&self, id: DbId, note: &ValidNote) -> Result<u64, StoreError> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        let Some(existing) = inner.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(0);
        };
        existing.title = note.title.clone();
        existing.description = note.description.clone();
        existing.category = note.category;
        existing.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete(&self, id: DbId) -> Result<u64, StoreError> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        let before = inner.notes.len();
        inner.notes.retain(|n| n.id != id);
        Ok((before - inner.notes.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
