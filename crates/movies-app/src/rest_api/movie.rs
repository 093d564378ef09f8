use axum::extract::{FromRequestParts, Path};
use http::request::Parts;

use crate::{error::ApiError, service::MovieService, state::AppState};
use axum::routing::get;

pub const DELETE_SUCCESS_MESSAGE: &str = "success delete movie";

/// Numeric movie id from path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for MovieId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        raw.parse()
            .map(MovieId)
            .map_err(|_| ApiError::BadRequest(format!("Invalid movie id: {raw}")))
    }
}

pub mod crud_api {
    use super::*;
    use crate::contract::{GetListResponse, MovieRequest, MovieResponse};
    use crate::error::ApiResult;
    use crate::rest_api::{context::RequestMeta, envelope::Envelope, paging::ListQuery};
    use crate::validate::Garde;
    use axum::{
        Json,
        extract::{Query, State},
    };
    use tracing::debug;

    pub async fn list<S: MovieService>(
        State(state): State<AppState<S>>,
        meta: RequestMeta,
        Garde(Query(query)): Garde<Query<ListQuery>>,
    ) -> ApiResult<Envelope<GetListResponse>> {
        let params = query.into_list_params(state.app_config().default_page_size)?;
        debug!("List params: {params:?}");
        let movies = state.service().list(params).await?;
        Ok(Envelope::success(movies, &meta))
    }

    pub async fn get<S: MovieService>(
        State(state): State<AppState<S>>,
        meta: RequestMeta,
        MovieId(id): MovieId,
    ) -> ApiResult<Envelope<MovieResponse>> {
        let movie = state.service().get(id).await?;
        Ok(Envelope::success(movie, &meta))
    }

    pub async fn create<S: MovieService>(
        State(state): State<AppState<S>>,
        meta: RequestMeta,
        Garde(Json(payload)): Garde<Json<MovieRequest>>,
    ) -> ApiResult<Envelope<MovieResponse>> {
        let movie = state.service().create(payload).await?;
        Ok(Envelope::success(movie, &meta))
    }

    pub async fn update<S: MovieService>(
        State(state): State<AppState<S>>,
        meta: RequestMeta,
        MovieId(id): MovieId,
        Garde(Json(payload)): Garde<Json<MovieRequest>>,
    ) -> ApiResult<Envelope<MovieResponse>> {
        let movie = state.service().update(payload, id).await?;
        Ok(Envelope::success(movie, &meta))
    }

    pub async fn delete<S: MovieService>(
        State(state): State<AppState<S>>,
        meta: RequestMeta,
        MovieId(id): MovieId,
    ) -> ApiResult<Envelope<&'static str>> {
        state.service().delete(id).await?;
        Ok(Envelope::success(DELETE_SUCCESS_MESSAGE, &meta))
    }
}

pub fn router<S: MovieService>() -> axum::Router<AppState<S>> {
    axum::Router::new()
        .route(
            "/movies",
            get(crud_api::list::<S>).post(crud_api::create::<S>),
        )
        .route(
            "/movies/{id}",
            get(crud_api::get::<S>)
                .patch(crud_api::update::<S>)
                .delete(crud_api::delete::<S>),
        )
}
