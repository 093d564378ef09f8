use clap::{Parser, Subcommand};

use crate::commands::{flush_cache::FlushCacheCmd, migrate::MigrateCmd};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for movies - manages database schema and cache of movies server."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Database schema migrations
    Migrate(MigrateCmd),
    /// Remove all cached movie queries from shared cache
    FlushCache(FlushCacheCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Migrate(cmd) => cmd.run().await,
            Command::FlushCache(cmd) => cmd.run().await,
        }
    }
}
