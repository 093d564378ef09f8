pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Cache backend not available: {0}")]
    Unsupported(String),
}
