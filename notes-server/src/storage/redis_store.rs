//! Redis-backed store
//!
//! Uses a multiplexed `ConnectionManager`, which reconnects on its own and
//! is cheap to clone per call. Failures are reported, never retried here.

use super::NoteStore;
use crate::error::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to the Redis server at `url`
    pub async fn connect(url: &str) -> Result<Self> {
        tracing::info!("Connecting to Redis at: {}", url);

        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;

        tracing::info!("Redis connection established");

        Ok(Self { conn })
    }
}

/// `TTL` replies -2 for a missing key and -1 for a key without expiry.
fn ttl_reply(seconds: i64) -> Option<i64> {
    (seconds >= 0).then_some(seconds)
}

#[async_trait]
impl NoteStore for RedisStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn remaining_ttl(&self, key: &str) -> Result<Option<i64>> {
        let mut conn = self.conn.clone();
        let seconds: i64 = conn.ttl(key).await?;
        Ok(ttl_reply(seconds))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn scan(
        &self,
        cursor: u64,
        pattern: &str,
        page_size: usize,
    ) -> Result<(u64, Vec<String>)> {
        let mut conn = self.conn.clone();
        let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(page_size)
            .query_async(&mut conn)
            .await?;

        tracing::debug!("SCAN {} -> {} keys, next cursor {}", cursor, keys.len(), next);

        Ok((next, keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_reply() {
        assert_eq!(ttl_reply(42), Some(42));
        assert_eq!(ttl_reply(0), Some(0));
        assert_eq!(ttl_reply(-1), None);
        assert_eq!(ttl_reply(-2), None);
    }
}
