use std::time::Duration;

use redis::{AsyncCommands as _, aio::ConnectionManager};
use tracing::debug;

use crate::{Cache, error::Result};

const SCAN_BATCH: usize = 100;

/// Cache shared between server instances, backed by Redis
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    ttl_secs: u64,
}

impl RedisCache {
    pub async fn connect(url: &str, ttl: Duration) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        debug!("Connected to redis at {url}");
        Ok(RedisCache {
            conn,
            ttl_secs: ttl.as_secs(),
        })
    }

    async fn scan(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut found = Vec::new();
        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;
            found.extend(keys);
            if next == 0 {
                break;
            }
            cursor = next;
        }
        Ok(found)
    }
}

impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut conn = self.conn.clone();
        if self.ttl_secs > 0 {
            let _: () = conn.set_ex(key, value, self.ttl_secs).await?;
        } else {
            let _: () = conn.set(key, value).await?;
        }
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let keys = self.scan(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn.clone();
        let removed: u64 = conn.del(keys).await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Needs running redis, e.g. REDIS_URL=redis://127.0.0.1:6379 cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_redis_roundtrip() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
        let cache = RedisCache::connect(&url, Duration::from_secs(30))
            .await
            .unwrap();
        cache
            .set("movies-test:detail:1", "one".into())
            .await
            .unwrap();
        cache
            .set("movies-test:detail:2", "two".into())
            .await
            .unwrap();
        assert_eq!(
            cache.get("movies-test:detail:1").await.unwrap().as_deref(),
            Some("one")
        );
        let removed = cache.delete_pattern("movies-test:*").await.unwrap();
        assert_eq!(removed, 2);
        assert!(cache.get("movies-test:detail:2").await.unwrap().is_none());
    }
}
