use std::future::Future;

use movies_dal::{
    ListParams,
    movie::{DefaultMovieRepository, Movie, MovieRepository},
};
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::debug;

use crate::contract::{GetListResponse, MovieRequest, MovieResponse, Pagination};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Movie not found")]
    MovieNotFound,
    #[error("Repository error: {0}")]
    Repository(movies_dal::Error),
}

impl From<movies_dal::Error> for ServiceError {
    fn from(value: movies_dal::Error) -> Self {
        match value {
            movies_dal::Error::RecordNotFound(_) => ServiceError::MovieNotFound,
            other => ServiceError::Repository(other),
        }
    }
}

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

pub trait MovieService: Send + Sync + 'static {
    fn get(&self, id: i64) -> impl Future<Output = Result<MovieResponse>> + Send;
    fn list(&self, params: ListParams) -> impl Future<Output = Result<GetListResponse>> + Send;
    fn create(&self, request: MovieRequest) -> impl Future<Output = Result<MovieResponse>> + Send;
    fn update(
        &self,
        request: MovieRequest,
        id: i64,
    ) -> impl Future<Output = Result<MovieResponse>> + Send;
    fn delete(&self, id: i64) -> impl Future<Output = Result<()>> + Send;
}

pub struct MovieServiceImpl<R> {
    repository: R,
}

pub type DefaultMovieService = MovieServiceImpl<DefaultMovieRepository>;

impl<R> MovieServiceImpl<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

/// Merge-patch: only non-empty strings and non-zero rating replace current values
fn merge(mut current: Movie, request: MovieRequest) -> Movie {
    fn replace(current: &mut String, new: String) {
        if !new.is_empty() {
            *current = new;
        }
    }
    replace(&mut current.title, request.title);
    replace(&mut current.description, request.description);
    replace(&mut current.image, request.image);
    if request.rating != 0.0 {
        current.rating = request.rating;
    }
    current
}

impl<R: MovieRepository + 'static> MovieService for MovieServiceImpl<R> {
    async fn get(&self, id: i64) -> Result<MovieResponse> {
        let movie = self.repository.get(id).await?;
        Ok(movie.into())
    }

    async fn list(&self, params: ListParams) -> Result<GetListResponse> {
        let movies = self.repository.list(&params).await?;
        let total = self.repository.count(&params).await?;
        debug!("Listed {} of {total} movies", movies.len());
        Ok(GetListResponse {
            data: movies.into_iter().map(MovieResponse::from).collect(),
            pagination: Pagination::new(params.page, params.limit, total),
        })
    }

    async fn create(&self, request: MovieRequest) -> Result<MovieResponse> {
        let movie = self.repository.create(request.into()).await?;
        Ok(movie.into())
    }

    async fn update(&self, request: MovieRequest, id: i64) -> Result<MovieResponse> {
        let current = self.repository.get(id).await?;
        let mut merged = merge(current, request);
        let now = OffsetDateTime::now_utc();
        merged.updated_at = PrimitiveDateTime::new(now.date(), now.time());
        self.repository.update(&merged).await?;
        Ok(merged.into())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let current = self.repository.get(id).await?;
        self.repository.delete(current.id).await?;
        Ok(())
    }
}
