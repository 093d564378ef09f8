use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::{Cache, error::Result};

pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// In-process cache bounded by entry count, entries expire after TTL
/// (zero TTL means no expiration)
#[derive(Clone)]
pub struct MemoryCache {
    inner: MokaCache<String, String>,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_MAX_CAPACITY)
    }

    pub fn with_capacity(ttl: Duration, max_capacity: u64) -> Self {
        let mut builder = MokaCache::builder().max_capacity(max_capacity);
        if !ttl.is_zero() {
            builder = builder.time_to_live(ttl);
        }
        MemoryCache {
            inner: builder.build(),
        }
    }

    /// Number of live entries, after pending evictions are applied
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.get(key).await)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.inner.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let matching: Vec<_> = self
            .inner
            .iter()
            .filter(|(key, _)| glob_match(pattern, key))
            .map(|(key, _)| key)
            .collect();
        let mut removed = 0;
        for key in matching {
            if self.inner.remove(key.as_str()).await.is_some() {
                removed += 1;
            }
        }
        debug!("Removed {removed} entries matching {pattern}");
        Ok(removed)
    }
}

/// Matches text against glob pattern with `*` (any sequence) and `?` (any single char)
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            backtrack = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = backtrack {
            p = star_p + 1;
            t = star_t + 1;
            backtrack = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
