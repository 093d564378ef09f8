pub mod error;
pub mod keys;
pub mod movie;

use std::str::FromStr as _;

pub use error::Error;
use serde::{Deserialize, Serialize};
pub use sqlx::Error as SqlxError;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::error::Result;

pub type ChosenDB = sqlx::Sqlite;
pub type Pool = sqlx::Pool<ChosenDB>;

pub const MAX_LIMIT: i64 = 10_000;
pub const DEFAULT_LIMIT: i64 = 10;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn new_pool(database_url: &str) -> Result<Pool, Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(50)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Applies all pending migrations
pub async fn migrate(pool: &Pool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Paging for list queries.
///
/// Serialized form (fields in declaration order) is used as part of cache keys,
/// so field order must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
    pub keyword: String,
}

impl ListParams {
    /// page is 1 based, offset is derived from page and limit
    pub fn new(page: i64, limit: i64, keyword: impl Into<String>) -> Self {
        ListParams {
            page,
            limit,
            offset: (page - 1).max(0).saturating_mul(limit),
            keyword: keyword.into(),
        }
    }
}

impl Default for ListParams {
    fn default() -> Self {
        ListParams::new(1, DEFAULT_LIMIT, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_offset() {
        assert_eq!(ListParams::new(1, 10, "").offset, 0);
        assert_eq!(ListParams::new(3, 10, "").offset, 20);
        assert_eq!(ListParams::new(2, 7, "x").offset, 7);
        assert_eq!(ListParams::default().limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_list_params_serialization_order() {
        let json = serde_json::to_string(&ListParams::new(2, 5, "star")).unwrap();
        assert_eq!(
            json,
            r#"{"page":2,"limit":5,"offset":5,"keyword":"star"}"#
        );
    }
}
