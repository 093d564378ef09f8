use std::{future::Future, time::Duration};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

pub mod error;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use error::{Error, Result};
pub use memory::MemoryCache;
#[cfg(feature = "redis")]
pub use self::redis::RedisCache;

/// Key-value store for serialized query results.
///
/// Values are opaque strings, expiration is handled by the implementation.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<()>> + Send;
    /// Removes all keys matching glob pattern (`*` and `?` wildcards), returns number of removed keys
    fn delete_pattern(&self, pattern: &str) -> impl Future<Output = Result<u64>> + Send;
}

#[derive(Clone)]
pub enum CacheBackend {
    Memory(MemoryCache),
    #[cfg(feature = "redis")]
    Redis(RedisCache),
}

impl CacheBackend {
    /// Redis when url is provided, in-process memory cache otherwise.
    /// max_capacity applies only to memory cache.
    pub async fn connect(
        redis_url: Option<&str>,
        ttl: Duration,
        max_capacity: u64,
    ) -> Result<Self> {
        match redis_url {
            #[cfg(feature = "redis")]
            Some(url) => Ok(CacheBackend::Redis(RedisCache::connect(url, ttl).await?)),
            #[cfg(not(feature = "redis"))]
            Some(url) => Err(Error::Unsupported(format!(
                "redis support not compiled in, cannot use {url}"
            ))),
            None => Ok(CacheBackend::Memory(MemoryCache::with_capacity(
                ttl,
                max_capacity,
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CacheBackend::Memory(_) => "memory",
            #[cfg(feature = "redis")]
            CacheBackend::Redis(_) => "redis",
        }
    }
}

impl Cache for CacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            CacheBackend::Memory(c) => c.get(key).await,
            #[cfg(feature = "redis")]
            CacheBackend::Redis(c) => c.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        match self {
            CacheBackend::Memory(c) => c.set(key, value).await,
            #[cfg(feature = "redis")]
            CacheBackend::Redis(c) => c.set(key, value).await,
        }
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        match self {
            CacheBackend::Memory(c) => c.delete_pattern(pattern).await,
            #[cfg(feature = "redis")]
            CacheBackend::Redis(c) => c.delete_pattern(pattern).await,
        }
    }
}

/// Cache-aside read: returns cached value for key if present,
/// otherwise calls loader and caches its result.
///
/// Loader errors are returned as they are and nothing is cached.
/// Entry that cannot be deserialized is treated as a miss and overwritten.
pub async fn read_through<C, T, E, F, Fut>(
    cache: &C,
    key: &str,
    loader: F,
) -> std::result::Result<T, E>
where
    C: Cache,
    T: Serialize + DeserializeOwned,
    E: From<Error>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    if let Some(cached) = cache.get(key).await? {
        match serde_json::from_str(&cached) {
            Ok(value) => {
                debug!("Cache hit for {key}");
                return Ok(value);
            }
            Err(e) => warn!("Invalid cache entry for {key}: {e}"),
        }
    } else {
        debug!("Cache miss for {key}");
    }

    let value = loader().await?;
    let serialized = serde_json::to_string(&value).map_err(Error::from)?;
    cache.set(key, serialized).await?;
    Ok(value)
}
