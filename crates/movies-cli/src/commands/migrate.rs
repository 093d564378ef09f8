use clap::{Parser, Subcommand};
use movies_dal::{MIGRATOR, Pool};
use movies_types::config::BackendConfig;
use sqlx::migrate::{AppliedMigration, Migrate as _};
use tracing::debug;

use crate::commands::Executor;

#[derive(Parser, Debug)]
pub struct MigrateCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[command(subcommand)]
    action: MigrateAction,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Revert the latest applied migration
    Rollback,
    /// Print applied migrations
    Version,
}

pub async fn open_pool(backend: &BackendConfig) -> anyhow::Result<Pool> {
    if backend.uses_data_dir() {
        tokio::fs::create_dir_all(backend.data_dir()).await?;
    }
    let url = backend.database_url();
    debug!("Opening database {url}");
    Ok(movies_dal::new_pool(&url).await?)
}

async fn applied_migrations(pool: &Pool) -> anyhow::Result<Vec<AppliedMigration>> {
    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;
    let mut applied = conn.list_applied_migrations().await?;
    applied.sort_by_key(|m| m.version);
    Ok(applied)
}

fn describe(version: i64) -> String {
    MIGRATOR
        .iter()
        .find(|m| m.version == version && m.migration_type.is_up_migration())
        .map(|m| format!("{version} {}", m.description))
        .unwrap_or_else(|| format!("{version} (unknown)"))
}

/// Applies action, returns versions applied afterwards
pub async fn migrate(pool: &Pool, action: MigrateAction) -> anyhow::Result<Vec<i64>> {
    match action {
        MigrateAction::Up => {
            MIGRATOR.run(pool).await?;
        }
        MigrateAction::Rollback => {
            let applied = applied_migrations(pool).await?;
            match applied.as_slice() {
                [] => println!("No migrations to revert"),
                [.., latest] => {
                    let target = applied
                        .iter()
                        .rev()
                        .nth(1)
                        .map(|m| m.version)
                        .unwrap_or(0);
                    MIGRATOR.undo(pool, target).await?;
                    println!("Reverted {}", describe(latest.version));
                }
            }
        }
        MigrateAction::Version => {}
    }
    let applied = applied_migrations(pool).await?;
    Ok(applied.into_iter().map(|m| m.version).collect())
}

impl Executor for MigrateCmd {
    async fn run(self) -> anyhow::Result<()> {
        let pool = open_pool(&self.backend).await?;
        let applied = migrate(&pool, self.action).await?;
        if applied.is_empty() {
            println!("No migrations applied");
        }
        for version in applied {
            println!("{}", describe(version));
        }
        Ok(())
    }
}
