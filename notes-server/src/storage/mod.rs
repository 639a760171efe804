//! Storage module
//!
//! The TTL-aware key-value store the notes live in, plus the key naming
//! used for notes. Key existence is note liveness: expiry is entirely the
//! store's job.

pub mod memory_store;
pub mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

use crate::config::NOTE_KEY_PREFIX;
use crate::error::Result;
use async_trait::async_trait;

/// Primitives the notes service needs from its backing store.
///
/// Each call is atomic on its own key; nothing spans calls.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Write `value` under `key`, expiring after `ttl_seconds`
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Seconds until `key` expires; `None` if it has no expiry or is gone
    async fn remaining_ttl(&self, key: &str) -> Result<Option<i64>>;

    /// Remove `key`, reporting whether it existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// One page of keys matching `pattern`. Cursor 0 starts the walk and a
    /// returned cursor of 0 ends it.
    async fn scan(&self, cursor: u64, pattern: &str, page_size: usize)
        -> Result<(u64, Vec<String>)>;
}

/// Store key for a note id
pub fn note_key(id: &str) -> String {
    format!("{}{}", NOTE_KEY_PREFIX, id)
}

/// Note id for a store key, if the key is in the note namespace
pub fn note_id(key: &str) -> Option<&str> {
    key.strip_prefix(NOTE_KEY_PREFIX)
}

/// Glob matching every note key
pub fn note_pattern() -> String {
    format!("{}*", NOTE_KEY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let id = "6f1c2a9e-0000-4000-8000-000000000001";

        assert_eq!(note_key(id), format!("note:{}", id));
        assert_eq!(note_id(&note_key(id)), Some(id));
        assert_eq!(note_id("other:abc"), None);
        assert_eq!(note_pattern(), "note:*");
    }

    #[test]
    fn test_only_leading_prefix_is_stripped() {
        assert_eq!(note_id("note:a-note:b"), Some("a-note:b"));
    }
}
