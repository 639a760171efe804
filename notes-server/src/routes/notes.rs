//! Note routes
//!
//! Thin adapters between HTTP and the notes service.

use crate::app::AppState;
use crate::error::Result;
use crate::models::{CreateNoteRequest, CreatedNote, DeleteOutcome, NoteView};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

/// Create a new note
///
/// A missing or malformed body counts as an empty request, which then
/// fails validation for lack of text.
pub async fn create_note(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedNote>)> {
    let req: CreateNoteRequest = serde_json::from_slice(&body).unwrap_or_default();
    let created = state.notes_service.create_note(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List live notes, soonest to expire first
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<NoteView>>> {
    Ok(Json(state.notes_service.list_notes().await?))
}

/// Delete a note by id
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>> {
    Ok(Json(state.notes_service.delete_note(&id).await?))
}
