use anyhow::bail;
use clap::Parser;
use movies_cache::{Cache as _, CacheBackend};
use movies_dal::keys::INVALIDATION_PATTERN;
use movies_types::config::BackendConfig;

use crate::commands::Executor;

#[derive(Parser, Debug)]
pub struct FlushCacheCmd {
    #[command(flatten)]
    backend: BackendConfig,
}

impl Executor for FlushCacheCmd {
    async fn run(self) -> anyhow::Result<()> {
        let Some(url) = self.backend.redis_url.as_deref() else {
            bail!("--redis-url is required, memory cache exists only inside server process");
        };
        let cache = CacheBackend::connect(
            Some(url),
            self.backend.cache_ttl,
            self.backend.cache_capacity,
        )
        .await?;
        let removed = cache.delete_pattern(INVALIDATION_PATTERN).await?;
        println!("Removed {removed} cached entries");
        Ok(())
    }
}
