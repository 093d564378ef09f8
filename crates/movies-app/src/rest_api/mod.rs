pub mod context;
pub mod envelope;
pub mod movie;
pub mod paging;

use axum::{Router, middleware};

use crate::{service::MovieService, state::AppState};

/// Movie API with request context applied, ready to be served
pub fn api_router<S: MovieService>(state: AppState<S>) -> Router {
    let default_language = state.app_config().default_language;
    movie::router()
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            default_language,
            context::request_context,
        ))
}
