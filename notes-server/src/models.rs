//! Note models
//!
//! Rust structs for the stored note payload and the shapes exchanged
//! with HTTP clients. All models use serde.

use serde::{Deserialize, Serialize};

/// Content fields of a note, as stored under its key.
///
/// `id` comes from the key and the remaining ttl from the store, so neither
/// is part of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContent {
    pub text: String,
    #[serde(default)]
    pub tag: String,
    /// Lifetime requested at creation, in seconds
    #[serde(default)]
    pub original_ttl: i64,
    /// Unix timestamp (seconds) of creation
    #[serde(default)]
    pub created_at: i64,
}

/// A live note as returned by listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: String,
    pub text: String,
    pub tag: String,
    /// Seconds until the store drops the note; 0 when the store reports none
    pub ttl: i64,
    pub original_ttl: i64,
}

/// Create note request
///
/// `tag` and `ttl` stay loosely typed so a badly typed optional field never
/// discards the text: a non-string tag reads as no tag, and an unparseable
/// ttl falls back to the default lifetime.
#[derive(Debug, Default, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tag: Option<serde_json::Value>,
    #[serde(default)]
    pub ttl: Option<serde_json::Value>,
}

impl CreateNoteRequest {
    pub fn new(text: impl Into<String>, tag: Option<&str>, ttl: Option<i64>) -> Self {
        Self {
            text: Some(text.into()),
            tag: tag.map(serde_json::Value::from),
            ttl: ttl.map(serde_json::Value::from),
        }
    }
}

/// Result of a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedNote {
    pub id: String,
    /// Effective lifetime written to the store
    pub ttl: i64,
}

/// Result of a delete; `false` means no such note was live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted: bool,
}
