//! Handlers for the `/notes` resource.
//!
//! Write handlers validate the body before touching the store, so an
//! invalid payload never causes a partial write.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use notebox_core::error::CoreError;
use notebox_core::note::{validate_note, Category, NoteInput, ValidNote};
use notebox_core::search::NoteFilter;
use notebox_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::query::ListNotesParams;
use crate::response::{CreatedNote, MessageResponse, NoteListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decode and validate a note body. Decode failures and constraint
/// violations both surface as 400.
fn validated_body(payload: Result<Json<NoteInput>, JsonRejection>) -> AppResult<ValidNote> {
    let Json(input) = payload?;
    let note = validate_note(&input).map_err(CoreError::from)?;
    Ok(note)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Note", id })
}

// ---------------------------------------------------------------------------
// POST /notes
// ---------------------------------------------------------------------------

/// Create a note and return it with its assigned id.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> AppResult<Json<CreatedNote>> {
    let note = validated_body(payload)?;

    let id = state
        .store
        .insert(&note)
        .await
        .map_err(AppError::store("Failed to create note."))?;

    tracing::info!(id, category = %note.category, "Note created");
    Ok(Json(CreatedNote::new(id, note)))
}

// ---------------------------------------------------------------------------
// GET /notes
// ---------------------------------------------------------------------------

/// List notes, newest first, with optional title search and category filter.
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListNotesParams>, QueryRejection>,
) -> AppResult<Json<NoteListResponse>> {
    let Query(params) = params?;

    let category = match params.category.as_deref().filter(|c| !c.is_empty()) {
        None => None,
        Some(name) => match name.parse::<Category>() {
            Ok(category) => Some(category),
            Err(err) => {
                // No stored note can carry an unknown category.
                tracing::debug!(error = %err, "Listing with unknown category");
                let filter = NoteFilter::new(None, None, params.page, params.limit);
                return Ok(Json(NoteListResponse {
                    page: filter.page.page,
                    limit: filter.page.limit,
                    notes: Vec::new(),
                }));
            }
        },
    };

    let filter = NoteFilter::new(params.search.as_deref(), category, params.page, params.limit);

    let notes = state
        .store
        .list(&filter)
        .await
        .map_err(AppError::store_with_detail("Failed to fetch notes."))?;

    tracing::debug!(count = notes.len(), page = filter.page.page, "Listed notes");
    Ok(Json(NoteListResponse {
        page: filter.page.page,
        limit: filter.page.limit,
        notes,
    }))
}

// ---------------------------------------------------------------------------
// PUT /notes/{id}
// ---------------------------------------------------------------------------

/// Replace a note's title, description and category.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let note = validated_body(payload)?;

    let affected = state
        .store
        .update(id, &note)
        .await
        .map_err(AppError::store("Failed to update note."))?;

    if affected == 0 {
        return Err(not_found(id));
    }

    tracing::info!(id, "Note updated");
    Ok(Json(MessageResponse {
        message: "Note updated successfully.",
    }))
}

// ---------------------------------------------------------------------------
// DELETE /notes/{id}
// ---------------------------------------------------------------------------

/// Delete a note by ID.
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(id) = id?;

    let affected = state
        .store
        .delete(id)
        .await
        .map_err(AppError::store("Failed to delete note."))?;

    if affected == 0 {
        return Err(not_found(id));
    }

    tracing::info!(id, "Note deleted");
    Ok(Json(MessageResponse {
        message: "Note deleted successfully.",
    }))
}
