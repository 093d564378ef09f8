use std::future::Future;

use movies_cache::{Cache, CacheBackend, read_through};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    ListParams, Pool,
    error::{Error, Result},
    keys,
};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub rating: f32,
    pub image: String,
    pub created_at: time::PrimitiveDateTime,
    pub updated_at: time::PrimitiveDateTime,
    pub deleted_at: Option<time::PrimitiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateMovie {
    pub title: String,
    pub description: String,
    pub rating: f32,
    pub image: String,
}

pub trait MovieRepository: Send + Sync {
    fn get(&self, id: i64) -> impl Future<Output = Result<Movie>> + Send;
    fn list(&self, params: &ListParams) -> impl Future<Output = Result<Vec<Movie>>> + Send;
    fn count(&self, params: &ListParams) -> impl Future<Output = Result<i64>> + Send;
    fn create(&self, payload: CreateMovie) -> impl Future<Output = Result<Movie>> + Send;
    /// Overwrites editable fields and updated_at of the record with movie.id
    fn update(&self, movie: &Movie) -> impl Future<Output = Result<()>> + Send;
    /// Soft delete
    fn delete(&self, id: i64) -> impl Future<Output = Result<()>> + Send;
}

const COLUMNS: &str = "id, title, description, rating, image, created_at, updated_at, deleted_at";

pub struct MovieRepositoryImpl<C> {
    pool: Pool,
    cache: C,
}

pub type DefaultMovieRepository = MovieRepositoryImpl<CacheBackend>;

impl<C: Cache> MovieRepositoryImpl<C> {
    pub fn new(pool: Pool, cache: C) -> Self {
        Self { pool, cache }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    async fn invalidate(&self) {
        match self.cache.delete_pattern(keys::INVALIDATION_PATTERN).await {
            Ok(removed) => debug!("Invalidated {removed} cached movie queries"),
            Err(e) => warn!("Failed to invalidate movie cache: {e}"),
        }
    }
}

impl<C: Cache> MovieRepository for MovieRepositoryImpl<C> {
    async fn get(&self, id: i64) -> Result<Movie> {
        read_through(&self.cache, &keys::detail(id), || async {
            let sql = format!("SELECT {COLUMNS} FROM movies WHERE id = ? AND deleted_at IS NULL");
            sqlx::query_as::<_, Movie>(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| Error::RecordNotFound("Movie".to_string()))
        })
        .await
    }

    async fn list(&self, params: &ListParams) -> Result<Vec<Movie>> {
        read_through(&self.cache, &keys::list(params)?, || async {
            let sql = format!(
                "SELECT {COLUMNS} FROM movies WHERE deleted_at IS NULL ORDER BY id LIMIT ? OFFSET ?"
            );
            let records = sqlx::query_as::<_, Movie>(&sql)
                .bind(params.limit)
                .bind(params.offset)
                .fetch_all(&self.pool)
                .await?;
            Ok::<_, Error>(records)
        })
        .await
    }

    async fn count(&self, params: &ListParams) -> Result<i64> {
        read_through(&self.cache, &keys::count(params)?, || async {
            let count: i64 =
                sqlx::query_scalar("SELECT count(*) FROM movies WHERE deleted_at IS NULL")
                    .fetch_one(&self.pool)
                    .await?;
            Ok::<_, Error>(count)
        })
        .await
    }

    async fn create(&self, payload: CreateMovie) -> Result<Movie> {
        let sql = format!(
            "INSERT INTO movies (title, description, rating, image, created_at, updated_at) \
             VALUES (?, ?, ?, ?, datetime('now'), datetime('now')) RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, Movie>(&sql)
            .bind(payload.title)
            .bind(payload.description)
            .bind(payload.rating)
            .bind(payload.image)
            .fetch_one(&self.pool)
            .await?;
        self.invalidate().await;
        Ok(record)
    }

    async fn update(&self, movie: &Movie) -> Result<()> {
        let res = sqlx::query(
            "UPDATE movies SET title = ?, description = ?, rating = ?, image = ?, \
             updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(movie.rating)
        .bind(&movie.image)
        .bind(movie.updated_at)
        .bind(movie.id)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(Error::RecordNotFound("Movie".to_string()));
        }
        self.invalidate().await;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query(
            "UPDATE movies SET deleted_at = datetime('now') WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(Error::RecordNotFound("Movie".to_string()));
        }
        self.invalidate().await;
        Ok(())
    }
}
