//! Contract tests for [`NoteStore`] implementations.
//!
//! Each behaviour is written once against `&dyn NoteStore` and run against
//! both the SQLite store (in-memory database, migrations applied) and the
//! in-memory fake, so the two cannot drift apart.

use assert_matches::assert_matches;
use notebox_core::note::{Category, ValidNote};
use notebox_core::search::NoteFilter;
use notebox_db::repositories::NoteRepo;
use notebox_db::{MemoryNoteStore, NoteStore, SqliteNoteStore, StoreError};

async fn sqlite_store() -> SqliteNoteStore {
    let pool = notebox_db::create_memory_pool().await.unwrap();
    notebox_db::run_migrations(&pool).await.unwrap();
    SqliteNoteStore::new(pool)
}

fn note(title: &str, category: Category) -> ValidNote {
    ValidNote {
        title: title.to_string(),
        description: format!("{title} description"),
        category,
    }
}

fn all() -> NoteFilter {
    NoteFilter::new(None, None, Some(1), Some(100))
}

fn titles(notes: &[notebox_db::models::note::Note]) -> Vec<&str> {
    notes.iter().map(|n| n.title.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Shared behaviours
// ---------------------------------------------------------------------------

async fn ids_are_fresh_and_never_reused(store: &dyn NoteStore) {
    let a = store.insert(&note("a", Category::Work)).await.unwrap();
    let b = store.insert(&note("b", Category::Work)).await.unwrap();
    assert!(b > a);

    assert_eq!(store.delete(b).await.unwrap(), 1);
    let c = store.insert(&note("c", Category::Work)).await.unwrap();
    assert!(c > b, "id {b} was reused as {c}");
}

async fn list_is_newest_first_and_paginated(store: &dyn NoteStore) {
    for i in 1..=15 {
        store
            .insert(&note(&format!("note {i:02}"), Category::Others))
            .await
            .unwrap();
    }

    let first = store
        .list(&NoteFilter::new(None, None, Some(1), Some(10)))
        .await
        .unwrap();
    let expected_first: Vec<String> = (6..=15).rev().map(|i| format!("note {i:02}")).collect();
    assert_eq!(titles(&first), expected_first);

    let second = store
        .list(&NoteFilter::new(None, None, Some(2), Some(10)))
        .await
        .unwrap();
    let expected_second: Vec<String> = (1..=5).rev().map(|i| format!("note {i:02}")).collect();
    assert_eq!(titles(&second), expected_second);

    let third = store
        .list(&NoteFilter::new(None, None, Some(3), Some(10)))
        .await
        .unwrap();
    assert!(third.is_empty());
}

async fn filters_are_conjunctive(store: &dyn NoteStore) {
    store.insert(&note("foo report", Category::Work)).await.unwrap();
    store.insert(&note("foo party", Category::Personal)).await.unwrap();
    store.insert(&note("budget", Category::Work)).await.unwrap();
    store.insert(&note("misc", Category::Others)).await.unwrap();

    let search = store
        .list(&NoteFilter::new(Some("foo"), None, None, None))
        .await
        .unwrap();
    assert_eq!(titles(&search), vec!["foo party", "foo report"]);

    let work = store
        .list(&NoteFilter::new(None, Some(Category::Work), None, None))
        .await
        .unwrap();
    assert_eq!(titles(&work), vec!["budget", "foo report"]);

    let both = store
        .list(&NoteFilter::new(Some("foo"), Some(Category::Work), None, None))
        .await
        .unwrap();
    assert_eq!(titles(&both), vec!["foo report"]);

    let none = store
        .list(&NoteFilter::new(Some("zzz"), None, None, None))
        .await
        .unwrap();
    assert!(none.is_empty());
}

async fn search_treats_wildcards_literally(store: &dyn NoteStore) {
    store.insert(&note("50% off", Category::Others)).await.unwrap();
    store.insert(&note("500 items", Category::Others)).await.unwrap();

    let hits = store
        .list(&NoteFilter::new(Some("0%"), None, None, None))
        .await
        .unwrap();
    assert_eq!(titles(&hits), vec!["50% off"]);
}

async fn update_replaces_content(store: &dyn NoteStore) {
    let id = store.insert(&note("draft", Category::Others)).await.unwrap();

    let affected = store
        .update(id, &note("final", Category::Work))
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let notes = store.list(&all()).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, id);
    assert_eq!(notes[0].title, "final");
    assert_eq!(notes[0].description, "final description");
    assert_eq!(notes[0].category, Category::Work);
    assert!(notes[0].updated_at >= notes[0].created_at);
}

async fn update_missing_id_changes_nothing(store: &dyn NoteStore) {
    store.insert(&note("keep", Category::Personal)).await.unwrap();
    let before = store.list(&all()).await.unwrap();

    let affected = store
        .update(9_999, &note("ghost", Category::Work))
        .await
        .unwrap();
    assert_eq!(affected, 0);

    assert_eq!(store.list(&all()).await.unwrap(), before);
}

async fn delete_twice_reports_absence(store: &dyn NoteStore) {
    let id = store.insert(&note("gone", Category::Others)).await.unwrap();
    assert_eq!(store.delete(id).await.unwrap(), 1);
    assert_eq!(store.delete(id).await.unwrap(), 0);
    assert!(store.list(&all()).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// SQLite store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sqlite_ids_are_fresh_and_never_reused() {
    ids_are_fresh_and_never_reused(&sqlite_store().await).await;
}

#[tokio::test]
async fn sqlite_list_is_newest_first_and_paginated() {
    list_is_newest_first_and_paginated(&sqlite_store().await).await;
}

#[tokio::test]
async fn sqlite_filters_are_conjunctive() {
    filters_are_conjunctive(&sqlite_store().await).await;
}

#[tokio::test]
async fn sqlite_search_treats_wildcards_literally() {
    search_treats_wildcards_literally(&sqlite_store().await).await;
}

#[tokio::test]
async fn sqlite_update_replaces_content() {
    update_replaces_content(&sqlite_store().await).await;
}

#[tokio::test]
async fn sqlite_update_missing_id_changes_nothing() {
    update_missing_id_changes_nothing(&sqlite_store().await).await;
}

#[tokio::test]
async fn sqlite_delete_twice_reports_absence() {
    delete_twice_reports_absence(&sqlite_store().await).await;
}

#[tokio::test]
async fn sqlite_update_keeps_created_at() {
    let store = sqlite_store().await;
    let id = store.insert(&note("t", Category::Others)).await.unwrap();
    let before = NoteRepo::find_by_id(store.pool(), id).await.unwrap().unwrap();

    store.update(id, &note("t2", Category::Work)).await.unwrap();
    let after = NoteRepo::find_by_id(store.pool(), id).await.unwrap().unwrap();

    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
    assert_eq!(after.title, "t2");
}

#[tokio::test]
async fn sqlite_rejects_unknown_category_at_storage_layer() {
    let store = sqlite_store().await;
    let result = sqlx::query("INSERT INTO notes (title, description, category) VALUES (?, ?, ?)")
        .bind("t")
        .bind("d")
        .bind("Chores")
        .execute(store.pool())
        .await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
    assert_eq!(NoteRepo::count(store.pool()).await.unwrap(), 0);
}

#[tokio::test]
async fn sqlite_ping_succeeds() {
    sqlite_store().await.ping().await.unwrap();
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn memory_ids_are_fresh_and_never_reused() {
    ids_are_fresh_and_never_reused(&MemoryNoteStore::new()).await;
}

#[tokio::test]
async fn memory_list_is_newest_first_and_paginated() {
    list_is_newest_first_and_paginated(&MemoryNoteStore::new()).await;
}

#[tokio::test]
async fn memory_filters_are_conjunctive() {
    filters_are_conjunctive(&MemoryNoteStore::new()).await;
}

#[tokio::test]
async fn memory_search_treats_wildcards_literally() {
    search_treats_wildcards_literally(&MemoryNoteStore::new()).await;
}

#[tokio::test]
async fn memory_update_replaces_content() {
    update_replaces_content(&MemoryNoteStore::new()).await;
}

#[tokio::test]
async fn memory_update_missing_id_changes_nothing() {
    update_missing_id_changes_nothing(&MemoryNoteStore::new()).await;
}

#[tokio::test]
async fn memory_delete_twice_reports_absence() {
    delete_twice_reports_absence(&MemoryNoteStore::new()).await;
}

#[tokio::test]
async fn memory_unavailable_fails_every_operation() {
    let store = MemoryNoteStore::new();
    store.set_unavailable(true);

    assert_matches!(
        store.insert(&note("x", Category::Work)).await,
        Err(StoreError::Unavailable(_))
    );
    assert_matches!(store.list(&all()).await, Err(StoreError::Unavailable(_)));
    assert_matches!(store.delete(1).await, Err(StoreError::Unavailable(_)));
    assert_matches!(store.ping().await, Err(StoreError::Unavailable(_)));
    assert!(store.is_empty().await);

    store.set_unavailable(false);
    store.ping().await.unwrap();
}
