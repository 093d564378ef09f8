pub mod commands;
pub mod config;

use commands::Executor as _;
use config::CliConfig;

pub async fn run(config: CliConfig) -> anyhow::Result<()> {
    config.command.run().await
}
