//! In-process TTL store
//!
//! Keeps keys in a sorted map with per-key deadlines. Expired keys are
//! evicted lazily whenever they are touched. Deadlines use tokio's clock,
//! so tests can pause and advance time.
//!
//! Scan cursors name the last key handed out, so a walk resumes by key
//! rather than by position: every key live for the whole walk is returned
//! exactly once, whatever is deleted or expires in between.
//!
//! Glob support is limited to what the service uses: an exact key, or a
//! pattern with a single trailing `*`.

use super::NoteStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| deadline > now)
    }
}

#[derive(Default)]
struct Inner {
    entries: BTreeMap<String, Entry>,
    /// Open scan cursors and the last key each one returned
    cursors: HashMap<u64, String>,
    next_cursor: u64,
}

impl Inner {
    fn evict_expired(&mut self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.is_live(now));
    }

    /// Look up a key, dropping it first if its deadline has passed
    fn live_entry(&mut self, key: &str) -> Option<&Entry> {
        let live = self.entries.get(key)?.is_live(Instant::now());
        if !live {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key)
    }

    fn open_cursor(&mut self, last_key: String) -> u64 {
        // Zero is reserved for "start" and "done".
        self.next_cursor = self.next_cursor.wrapping_add(1).max(1);
        self.cursors.insert(self.next_cursor, last_key);
        self.next_cursor
    }
}

/// In-memory implementation of [`NoteStore`]
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a key that never expires
    pub async fn set_persistent(&self, key: &str, value: &str) {
        self.inner.lock().await.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: None,
            },
        );
    }

    /// Number of live keys
    pub async fn len(&self) -> usize {
        let mut inner = self.inner.lock().await;
        inner.evict_expired();
        inner.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn glob_matches(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => key == pattern,
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<()> {
        let mut inner = self.inner.lock().await;

        // A non-positive lifetime is already over.
        if ttl_seconds <= 0 {
            inner.entries.remove(key);
            tracing::debug!("Dropped {}: ttl {}s is already expired", key, ttl_seconds);
            return Ok(());
        }

        // Past the clock's range the key simply never expires.
        let expires_at = Instant::now().checked_add(Duration::from_secs(ttl_seconds as u64));
        if expires_at.is_none() {
            tracing::debug!(
                "ttl {}s for {} exceeds the clock; storing without expiry",
                ttl_seconds,
                key
            );
        }

        inner.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );

        tracing::debug!("Stored {} with ttl {}s", key, ttl_seconds);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.live_entry(key).map(|entry| entry.value.clone()))
    }

    async fn remaining_ttl(&self, key: &str) -> Result<Option<i64>> {
        let mut inner = self.inner.lock().await;
        let remaining = inner
            .live_entry(key)
            .and_then(|entry| entry.expires_at)
            .map(|deadline| {
                let millis = deadline.saturating_duration_since(Instant::now()).as_millis();
                // Whole seconds, rounded up so a fresh key reports its full ttl.
                millis.div_ceil(1000) as i64
            });

        Ok(remaining)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let existed = inner.live_entry(key).is_some();
        inner.entries.remove(key);
        Ok(existed)
    }

    async fn scan(
        &self,
        cursor: u64,
        pattern: &str,
        page_size: usize,
    ) -> Result<(u64, Vec<String>)> {
        let mut inner = self.inner.lock().await;
        inner.evict_expired();

        let lower = if cursor == 0 {
            Bound::Unbounded
        } else {
            match inner.cursors.remove(&cursor) {
                Some(last_key) => Bound::Excluded(last_key),
                // Unknown or already finished cursor.
                None => return Ok((0, Vec::new())),
            }
        };

        let mut visited = inner
            .entries
            .range::<String, _>((lower, Bound::Unbounded))
            .map(|(key, _)| key);
        let page: Vec<&String> = visited.by_ref().take(page_size.max(1)).collect();
        let more = visited.next().is_some();

        let keys: Vec<String> = page
            .iter()
            .filter(|key| glob_matches(pattern, key))
            .map(|key| key.to_string())
            .collect();
        let last_key = page.last().map(|key| key.to_string());

        let next = match (more, last_key) {
            (true, Some(last_key)) => inner.open_cursor(last_key),
            _ => 0,
        };

        Ok((next, keys))
    }
}
