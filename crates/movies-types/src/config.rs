use clap::Parser;
use std::{path::PathBuf, time::Duration};

#[derive(Debug, Clone, Parser)]
pub struct BackendConfig {
    #[arg(
        long,
        env = "MOVIES_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db or similar, default is sqlite://[data-dir]/movies.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "MOVIES_DATA_DIR",
        help = "Data directory (database etc.), default is system default like ~/.local/share/movies",
        default_value_t = default_data_dir()
    )]
    data_dir: String,

    #[arg(
        long,
        env = "MOVIES_REDIS_URL",
        help = "Redis URL e.g. redis://127.0.0.1:6379, if not set in-process memory cache is used"
    )]
    pub redis_url: Option<String>,

    #[arg(
        long,
        env = "MOVIES_CACHE_TTL",
        default_value = "1h",
        help = "Validity of cached reads in human friendly format (e.g. 1h, 15m, 30s - or combined)",
        value_parser = humantime::parse_duration
    )]
    pub cache_ttl: Duration,

    #[arg(
        long,
        env = "MOVIES_CACHE_CAPACITY",
        default_value_t = 10_000,
        help = "Maximum number of entries kept by in-process memory cache"
    )]
    pub cache_capacity: u64,
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("movies"))
        .unwrap_or_else(|| PathBuf::from("movies"))
        .to_string_lossy()
        .to_string()
}

impl BackendConfig {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/movies.db", self.data_dir))
    }

    /// Database is placed in data directory, unless explicit URL was given
    pub fn uses_data_dir(&self) -> bool {
        self.database_url.is_none()
    }
}
