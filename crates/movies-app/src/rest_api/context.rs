use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{HeaderMap, header::ACCEPT_LANGUAGE, request::Parts};
use movies_types::Lang;
use tracing::debug;

use crate::{error::Failure, rest_api::envelope::Envelope};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per request values needed to render response envelope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestMeta {
    pub request_id: String,
    pub lang: Lang,
}

impl RequestMeta {
    pub fn from_headers(headers: &HeaderMap, default_lang: Lang) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let lang = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(Lang::from_accept_language)
            .unwrap_or(default_lang);
        RequestMeta { request_id, lang }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestMeta {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let meta = match parts.extensions.get::<RequestMeta>() {
            Some(meta) => meta.clone(),
            None => RequestMeta::from_headers(&parts.headers, Lang::default()),
        };
        Ok(meta)
    }
}

/// Middleware resolving request id and language,
/// failed responses are rendered as localized envelopes
pub async fn request_context(
    State(default_lang): State<Lang>,
    mut request: Request,
    next: Next,
) -> Response {
    let meta = RequestMeta::from_headers(request.headers(), default_lang);
    request.extensions_mut().insert(meta.clone());

    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<Failure>() {
        Some(failure) => {
            debug!(
                request_id = %meta.request_id,
                code = failure.code,
                "Request failed with status {}",
                response.status()
            );
            let status = response.status();
            (status, Json(Envelope::<()>::failure(&failure, &meta))).into_response()
        }
        None => response,
    }
}
