use std::sync::Arc;

use notebox_db::NoteStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Note persistence. SQLite in production, in-memory in some tests.
    pub store: Arc<dyn NoteStore>,
}
