use std::time::Duration;

use crate::error::Result;
pub use clap::Parser;
use movies_types::{Lang, config::BackendConfig};

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Movies API server")]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "MOVIES_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "MOVIES_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[command(flatten)]
    pub backend: BackendConfig,

    #[arg(
        long,
        env = "MOVIES_DEFAULT_LANGUAGE",
        default_value = "en",
        help = "Language of error messages when request does not ask for supported one (en, id)"
    )]
    pub default_language: Lang,

    #[arg(
        long,
        env = "MOVIES_DEFAULT_PAGE_SIZE",
        default_value_t = 10,
        value_parser = clap::value_parser!(i64).range(1..=movies_dal::MAX_LIMIT),
        help = "Default page size"
    )]
    pub default_page_size: i64,

    #[arg(
        long,
        env = "MOVIES_REQUEST_TIMEOUT",
        default_value = "60s",
        help = "Maximum time to handle request in human friendly format (e.g. 1m, 30s)",
        value_parser = humantime::parse_duration
    )]
    pub request_timeout: Duration,

    #[arg(long, env = "MOVIES_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    /// URL where server can be reached locally
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/", self.listen_address, self.port)
    }
}
