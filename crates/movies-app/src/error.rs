use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use http::StatusCode;
use tracing::error;

use crate::{
    rest_api::{context::RequestMeta, envelope::Envelope},
    service::ServiceError,
};

pub const ERR_BAD_REQUEST: &str = "err_bad_request";
pub const ERR_MOVIE_ID_NOT_FOUND: &str = "err_movie_id_not_found";
pub const ERR_INTERNAL_SERVER: &str = "err_internal_server";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Validation error: {0}")]
    Validation(#[from] garde::Report),
    #[error("Movie not found")]
    MovieNotFound,
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

/// Error attached to response extensions, rendered into localized envelope
/// by request context middleware
#[derive(Debug, Clone)]
pub struct Failure {
    pub code: &'static str,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MovieNotFound => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn failure(&self) -> Failure {
        match self {
            ApiError::BadRequest(msg) => Failure {
                code: ERR_BAD_REQUEST,
                detail: Some(msg.clone()),
            },
            ApiError::Validation(report) => Failure {
                code: ERR_BAD_REQUEST,
                detail: Some(
                    report
                        .iter()
                        .map(|(path, e)| format!("{path}: {e}"))
                        .collect::<Vec<_>>()
                        .join("; "),
                ),
            },
            ApiError::MovieNotFound => Failure {
                code: ERR_MOVIE_ID_NOT_FOUND,
                detail: None,
            },
            ApiError::Internal(_) => Failure {
                code: ERR_INTERNAL_SERVER,
                detail: None,
            },
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::MovieNotFound => ApiError::MovieNotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        ApiError::BadRequest(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            error!(error = %msg, "Internal error");
        }
        let failure = self.failure();
        // request context middleware replaces body with localized one
        let body = Envelope::<()>::failure(&failure, &RequestMeta::default());
        let mut response = (self.status(), body).into_response();
        response.extensions_mut().insert(failure);
        response
    }
}
