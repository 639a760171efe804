//! Notes service
//!
//! Note lifecycle on top of a TTL store: creation policy, the id to key
//! mapping, and listing ordered by remaining lifetime. The service never
//! tracks expiry itself; a note is live exactly while its key exists.

use crate::codec;
use crate::config::{DEFAULT_TTL_SECS, SCAN_PAGE_SIZE};
use crate::error::{AppError, Result};
use crate::models::{CreateNoteRequest, CreatedNote, DeleteOutcome, NoteContent, NoteView};
use crate::storage::{note_id, note_key, note_pattern, NoteStore};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Service for managing ephemeral notes
#[derive(Clone)]
pub struct NotesService {
    store: Arc<dyn NoteStore>,
}

impl NotesService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Create a note and return its id and the lifetime it was stored with
    pub async fn create_note(&self, req: CreateNoteRequest) -> Result<CreatedNote> {
        let text = req.text.as_deref().unwrap_or_default().trim().to_string();
        let tag = req
            .tag
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        let ttl = req
            .ttl
            .as_ref()
            .and_then(parse_ttl)
            .unwrap_or(DEFAULT_TTL_SECS);

        if text.is_empty() {
            tracing::warn!("Rejected note with empty text");
            return Err(AppError::Validation("empty text".to_string()));
        }

        let id = Uuid::new_v4().to_string();
        let payload = codec::encode(&NoteContent {
            text,
            tag,
            original_ttl: ttl,
            created_at: Utc::now().timestamp(),
        })?;

        self.store
            .set_with_expiry(&note_key(&id), &payload, ttl)
            .await?;

        tracing::info!("Note created: {} (ttl {}s)", id, ttl);

        Ok(CreatedNote { id, ttl })
    }

    /// List every live note, shortest remaining lifetime first
    pub async fn list_notes(&self) -> Result<Vec<NoteView>> {
        let pattern = note_pattern();
        let mut notes = Vec::new();
        let mut cursor = 0;

        loop {
            let (next, keys) = self.store.scan(cursor, &pattern, SCAN_PAGE_SIZE).await?;

            for key in keys {
                if let Some(note) = self.read_note(&key).await? {
                    notes.push(note);
                }
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        // Stable sort: equal ttls keep enumeration order.
        notes.sort_by_key(|note| note.ttl);

        tracing::debug!("Listed {} notes", notes.len());

        Ok(notes)
    }

    /// Delete a note; `deleted` is false when nothing was live under the id
    pub async fn delete_note(&self, id: &str) -> Result<DeleteOutcome> {
        let deleted = self.store.delete(&note_key(id)).await?;

        if deleted {
            tracing::info!("Note deleted: {}", id);
        } else {
            tracing::debug!("Delete of missing note: {}", id);
        }

        Ok(DeleteOutcome { deleted })
    }

    /// Read one scanned key. `None` when the key expired after the scan.
    async fn read_note(&self, key: &str) -> Result<Option<NoteView>> {
        let Some(id) = note_id(key) else {
            return Ok(None);
        };

        let value = self.store.get(key).await?;
        let remaining = self.store.remaining_ttl(key).await?;

        let Some(raw) = value else {
            tracing::warn!("Note {} vanished while listing", id);
            return Ok(None);
        };

        let content = codec::decode(&raw);

        Ok(Some(NoteView {
            id: id.to_string(),
            text: content.text,
            tag: content.tag,
            ttl: remaining.unwrap_or(0),
            original_ttl: content.original_ttl,
        }))
    }
}

/// Integer ttl from a JSON number or numeric string
fn parse_ttl(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
